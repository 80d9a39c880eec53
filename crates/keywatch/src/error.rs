use std::io;

use thiserror::Error;

/// Result type used throughout keywatch.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while tracking keyboard state.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A key name that cannot be turned into a token.
    #[error("invalid key")]
    InvalidKey(String),

    /// Acquiring or releasing the terminal input surface failed.
    #[error("terminal")]
    Terminal(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e.to_string())
    }
}
