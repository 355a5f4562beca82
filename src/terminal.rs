//! Terminal user interface: the only place command output is written.
//!
//! Commands talk to the `Ui` trait so their output can be asserted in tests; the
//! terminal implementation styles it with owo-colors, renders tables with comfy-table
//! and asks questions with dialoguer.

use crate::error::ApiError;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

pub trait Ui {
    fn say(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn ok(&mut self);
    /// Print the failure banner followed by `message`.
    fn failed(&mut self, message: &str);
    fn confirm(&mut self, prompt: &str) -> Result<bool, ApiError>;
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]);
}

pub struct TerminalUi {
    color: bool,
}

impl TerminalUi {
    /// Color is enabled only when stdout is a terminal and NO_COLOR is unset.
    pub fn new() -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui for TerminalUi {
    fn say(&mut self, message: &str) {
        println!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        if self.color {
            println!("{}", message.magenta());
        } else {
            println!("{}", message);
        }
    }

    fn ok(&mut self) {
        if self.color {
            println!("{}\n", "OK".green().bold());
        } else {
            println!("OK\n");
        }
    }

    fn failed(&mut self, message: &str) {
        if self.color {
            println!("{}", "FAILED".red().bold());
        } else {
            println!("FAILED");
        }
        println!("{}", message);
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, ApiError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        println!("{}", format_table(headers, rows));
    }
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}
