//! All error types for the langfix crate.
//!
//! Only the table collaborators (parsing, reading, writing) can fail. The
//! normalization primitives and the rule catalog are total.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid locale table: {0}")]
    InvalidTable(String),

    #[error("locale directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("locale `{locale}`: {source}")]
    Locale {
        locale: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a new invalid table error
    pub fn invalid_table(message: impl Into<String>) -> Self {
        Error::InvalidTable(message.into())
    }

    /// Wraps an error with the locale it happened in
    pub fn in_locale(locale: impl Into<String>, source: Error) -> Self {
        Error::Locale {
            locale: locale.into(),
            source: Box::new(source),
        }
    }
}
