//! Error types for edtest operations.

use std::path::PathBuf;

/// Errors that can occur while resolving inputs or running editor commands.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Platform name is not in the fixed platform table.
    #[error("unknown platform '{name}' (expected one of: {expected})")]
    UnknownPlatform {
        /// The rejected name.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    /// Version key has no entry in the revision table.
    #[error("unknown editor version '{key}' (expected one of: {expected})")]
    UnknownVersion {
        /// The rejected key.
        key: String,
        /// Comma-separated list of accepted keys.
        expected: String,
    },

    /// Runtime flavor is not one of the supported values.
    #[error("unknown runtime '{name}' (expected one of: latest, legacy)")]
    UnknownRuntime {
        /// The rejected name.
        name: String,
    },

    /// The artifact directory could not be created.
    #[error("cannot create artifact directory {}: {source}", path.display())]
    ArtifactDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A child process could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// Program that was being launched.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A child process exited unsuccessfully.
    #[error("command `{command}` failed with {}{}", describe_code(*code), stderr_tail(stderr))]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// I/O error while streaming child output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}

fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    let start = lines.len().saturating_sub(5);
    format!("\n{}", lines[start..].join("\n"))
}

/// Result type for edtest operations.
pub type Result<T> = std::result::Result<T, CoreError>;
