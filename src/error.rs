//! Error handling and custom error types
//!
//! Every failure the CLI can report maps onto a fixed exit-code taxonomy.
//! Failures classified from a Gemini response are carried as [`ApiError`];
//! everything else is a variant of [`Error`].

use std::path::PathBuf;
use thiserror::Error;

/// Failure kind, each with a stable process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    General,
    Usage,
    Auth,
    RateLimit,
    Api,
    FileIo,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::General => 1,
            ErrorKind::Usage => 2,
            ErrorKind::Auth => 3,
            ErrorKind::RateLimit => 4,
            ErrorKind::Api => 5,
            ErrorKind::FileIo => 10,
        }
    }
}

/// A classified failure of a generation request.
///
/// `status` is the HTTP status the API answered with, or 0 when the failure
/// did not come from the HTTP layer (blocked prompt, undecodable payload,
/// unreadable input image).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("api request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("encode json: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("create output directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("write image: {0}")]
    WriteImage(#[source] std::io::Error),

    #[error("no free file name for {0:?}")]
    NameExhausted(PathBuf),

    #[error("{0}")]
    Config(String),

    #[error("load config: {0}")]
    LoadConfig(String),

    #[error("save config: {0}")]
    SaveConfig(String),

    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Auth(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api(e) => e.kind,
            Error::Http(_)
            | Error::Serialization(_)
            | Error::Config(_)
            | Error::LoadConfig(_) => ErrorKind::General,
            Error::CreateDir(_)
            | Error::WriteImage(_)
            | Error::NameExhausted(_)
            | Error::SaveConfig(_) => ErrorKind::FileIo,
            Error::Usage(_) => ErrorKind::Usage,
            Error::Auth(_) => ErrorKind::Auth,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_fixed() {
        assert_eq!(ErrorKind::General.exit_code(), 1);
        assert_eq!(ErrorKind::Usage.exit_code(), 2);
        assert_eq!(ErrorKind::Auth.exit_code(), 3);
        assert_eq!(ErrorKind::RateLimit.exit_code(), 4);
        assert_eq!(ErrorKind::Api.exit_code(), 5);
        assert_eq!(ErrorKind::FileIo.exit_code(), 10);
    }

    #[test]
    fn test_api_error_displays_message_only() {
        let err = Error::from(ApiError::new(ErrorKind::RateLimit, "slow down", 429));
        assert_eq!(err.to_string(), "slow down");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_write_failures_are_file_io() {
        let err = Error::WriteImage(std::io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::FileIo);
        assert!(err.to_string().starts_with("write image:"));
    }

    #[test]
    fn test_json_encoding_failure_is_general() {
        let map = std::collections::HashMap::from([(vec![1u8], 1)]);
        let cause = serde_json::to_string(&map).unwrap_err();
        let err = Error::from(cause);
        assert_eq!(err.kind(), ErrorKind::General);
        assert!(err.to_string().starts_with("encode json:"));
    }

    #[test]
    fn test_usage_error_code() {
        assert_eq!(Error::Usage("bad".to_string()).exit_code(), 2);
    }
}
