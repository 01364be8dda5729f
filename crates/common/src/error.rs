//! Error types shared across recut crates.

/// Top-level error type for recut operations.
#[derive(Debug, thiserror::Error)]
pub enum RecutError {
    /// The recording bundle is missing media or carries malformed sidecars.
    #[error("Invalid bundle: {message}")]
    BundleInvalid { message: String },

    /// An edit was refused because it would break a model invariant.
    /// The previous snapshot is left untouched.
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    /// A slice or layout ID is not present in the current snapshot.
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Out of range: {message}")]
    OutOfRange { message: String },

    /// Cooperative cancellation; no state was changed.
    #[error("Operation cancelled")]
    Cancelled,

    /// An audio track drifted past the re-sync policy. Never fatal.
    #[error("Media drift of {drift_ms} ms on {track}")]
    MediaDrift { track: String, drift_ms: i64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using RecutError.
pub type RecutResult<T> = Result<T, RecutError>;

impl RecutError {
    pub fn bundle_invalid(msg: impl Into<String>) -> Self {
        Self::BundleInvalid {
            message: msg.into(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
        }
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
