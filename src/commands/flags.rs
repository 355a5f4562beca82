use std::collections::HashMap;

/// Parsed arguments for one invocation: positionals plus typed flag values.
///
/// Absent flags read as `""`, `0` and `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagContext {
    args: Vec<String>,
    strings: HashMap<String, Vec<String>>,
    ints: HashMap<String, i64>,
    bools: HashMap<String, bool>,
}

impl FlagContext {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_string(mut self, name: &str, value: impl Into<String>) -> Self {
        self.strings
            .entry(name.to_string())
            .or_default()
            .push(value.into());
        self
    }

    pub fn with_optional_string(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with_string(name, value),
            None => self,
        }
    }

    pub fn with_strings<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self = self.with_string(name, value);
        }
        self
    }

    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.ints.insert(name.to_string(), value);
        self
    }

    pub fn with_optional_int(self, name: &str, value: Option<i64>) -> Self {
        match value {
            Some(value) => self.with_int(name, value),
            None => self,
        }
    }

    /// A `false` bool is treated as not set.
    pub fn with_bool(mut self, name: &str, value: bool) -> Self {
        if value {
            self.bools.insert(name.to_string(), true);
        }
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Last value given for `name`.
    pub fn string(&self, name: &str) -> String {
        self.strings
            .get(name)
            .and_then(|values| values.last())
            .cloned()
            .unwrap_or_default()
    }

    pub fn string_slice(&self, name: &str) -> Vec<String> {
        self.strings.get(name).cloned().unwrap_or_default()
    }

    pub fn int(&self, name: &str) -> i64 {
        self.ints.get(name).copied().unwrap_or(0)
    }

    pub fn bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.strings.contains_key(name) || self.ints.contains_key(name) || self.bools.contains_key(name)
    }

    /// Names of every flag that was set, sorted.
    pub fn set_flags(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .strings
            .keys()
            .chain(self.ints.keys())
            .chain(self.bools.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
