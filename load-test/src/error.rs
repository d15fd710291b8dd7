//! Errors returned by this crate.
use goose::GooseError;

#[derive(Debug, thiserror::Error)]
/// Errors raised while reading the configuration from the environment
pub enum ConfigError {
    /// the variable is set but can't be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    /// a lower bound is above its upper bound
    #[error("{min_key} ({min}) must not be greater than {max_key} ({max})")]
    InvertedRange {
        min_key: &'static str,
        max_key: &'static str,
        min: String,
        max: String,
    },
}

#[derive(Debug, PartialEq, thiserror::Error)]
/// A JSON response didn't have the shape we expected
pub enum PayloadError {
    /// body is not valid json
    #[error("response body is not json: {0}")]
    NotJson(String),
    /// none of the collection keys holds an array
    #[error("no product collection found (tried {tried:?} and a bare array)")]
    MissingCollection { tried: &'static [&'static str] },
    /// none of the id keys holds a usable identifier
    #[error("no identifier found (tried {tried:?})")]
    MissingId { tried: &'static [&'static str] },
}

#[derive(Debug, thiserror::Error)]
/// Top level error of the load-test binary
pub enum LoadTestError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("goose error: {0}")]
    Goose(#[from] GooseError),
}
