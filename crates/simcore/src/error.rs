use thiserror::Error;

/// Errors raised while building or loading component configuration.
///
/// Tick-time code never produces these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sub-step count: {0} (must be >= 1)")]
    InvalidSubsteps(u32),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
