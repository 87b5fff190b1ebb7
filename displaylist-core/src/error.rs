/// Error taxonomy for loading and driving the engine
use thiserror::Error;

/// Errors surfaced by the harness.
///
/// Each variant is terminal for the operation that produced it; the only
/// retry in the harness is the resize busy-retry, which never surfaces
/// as an error.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("The current environment does not support multi-threaded WebAssembly, please check the COOP and COEP settings")]
    CrossOriginIsolationRequired,

    #[error("SharedArrayBuffer is not supported in this environment")]
    SharedMemoryUnavailable,

    #[error("failed to fetch {path}: {reason}")]
    AssetFetch { path: String, reason: String },

    #[error("missing element #{0}")]
    MissingElement(String),

    #[error("engine initialization failed: {0}")]
    EngineInit(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("invalid harness configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl HarnessError {
    /// True for the "environment unsupported" class of failures.
    pub fn is_environment(&self) -> bool {
        matches!(
            self,
            HarnessError::CrossOriginIsolationRequired | HarnessError::SharedMemoryUnavailable
        )
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
