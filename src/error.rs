// SPDX-License-Identifier: MPL-2.0
//! Error types for the few fallible edges of the crate.
//!
//! Notification operations themselves never fail: malformed input degrades
//! to a safe default. Errors only come from reading settings files and from
//! decoding flash-message URL fragments.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    /// A `#notify-<type>=<message>` fragment that could not be decoded.
    #[error("Fragment Error: {0}")]
    Fragment(#[from] FragmentError),
}

/// Specific reasons a flash-message fragment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    /// A `%` escape that is truncated or not followed by two hex digits.
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded message is not valid UTF-8")]
    InvalidUtf8,
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_display() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O Error: missing");
    }

    #[test]
    fn fragment_errors_are_wrapped() {
        let err: Error = FragmentError::MalformedEscape(3).into();
        assert_eq!(
            err.to_string(),
            "Fragment Error: malformed percent escape at byte 3"
        );
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let parse = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
