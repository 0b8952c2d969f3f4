use thiserror::Error;

/// Failure kinds surfaced by the simulation pipeline and its providers.
///
/// Recovery policy is the caller's: a `LocationResolution` error may be
/// answered by falling back to a default site, while `WeatherRetrieval`
/// halts the dependent run — the core never substitutes synthetic data.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("location lookup failed for {address:?}: {reason}")]
    LocationResolution { address: String, reason: String },

    #[error("weather retrieval failed: {0}")]
    WeatherRetrieval(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

impl SimError {
    pub fn weather(cause: impl std::fmt::Display) -> Self {
        SimError::WeatherRetrieval(cause.to_string())
    }

    pub fn config(cause: impl std::fmt::Display) -> Self {
        SimError::InvalidConfiguration(cause.to_string())
    }
}
