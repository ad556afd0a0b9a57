use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

/// Failures while reading the roster or writing a report file.  Nothing in the crate recovers
/// from these; they travel up to the menu loop and end the program.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Cannot access '{}' for {mode}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        mode: AccessMode,
        #[source]
        source: io::Error,
    },
    #[error("Malformed row at line {line}, field {field}: {reason}")]
    MalformedRow {
        line: u64,
        field: String,
        reason: String,
    },
}

impl RosterError {
    pub fn file_access(path: impl Into<PathBuf>, mode: AccessMode, source: io::Error) -> Self {
        RosterError::FileAccess {
            path: path.into(),
            mode,
            source,
        }
    }

    pub fn malformed(line: u64, field: impl Into<String>, reason: impl Into<String>) -> Self {
        RosterError::MalformedRow {
            line,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AccessMode::Read => write!(f, "reading"),
            AccessMode::Write => write!(f, "writing"),
        }
    }
}
