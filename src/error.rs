//! Error types.
//!
//! `AppError` is what the binary reports (message + process exit code).
//! `FeedError` is the per-feed failure taxonomy; it never escapes the
//! aggregator, which folds it into `FeedResult::Failure`.

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Configuration or usage problem (bad flag, unknown metric).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a single feed could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },
}

impl FeedError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}
