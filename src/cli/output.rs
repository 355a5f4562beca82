//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

/// Process exit status for a finished invocation.
pub fn exit_code(result: &Result<(), ApiError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
