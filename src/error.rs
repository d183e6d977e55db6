use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Everything that can end a turn early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Feed unreachable, timed out or not parseable as RSS.
    #[error("feed fetch failed: {0}")]
    Fetch(String),

    #[error("feed has no episodes")]
    EmptyFeed,

    #[error("no episode at position {ordinal} (feed has {len})")]
    NotFound { ordinal: usize, len: usize },

    /// A resolved episode that cannot be played.
    #[error("episode '{title}' is not playable: {reason}")]
    InvalidRecord { title: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
