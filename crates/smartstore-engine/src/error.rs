//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop startup so `main`
//! can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: smartstore_core::ConfigError,
    },

    /// The configured shelf set was rejected.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: smartstore_core::StoreError,
    },

    /// The API server failed to start.
    #[error("server error: {source}")]
    Server {
        /// The underlying startup error.
        #[from]
        source: smartstore_observer::StartupError,
    },

    /// Logging could not be initialized.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
