/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced to the host. Every per-tick operation is infallible; these
/// only arise while building a scene from its configuration.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A configuration value is outside the range the simulation can run with.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field, e.g. `weather.pool_size`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration document could not be parsed or rendered.
    #[error("config format error: {0}")]
    ConfigFormat(String),
}

impl SimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
