//! Errors raised while loading or validating a [`GameConfig`](crate::GameConfig)
//!
//! Gameplay outcomes (collision, running out of coal) are session phases,
//! not errors, so this is the crate's only error type.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse game config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read game config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid game config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Convenience alias for config loading results
pub type ConfigResult<T> = Result<T, ConfigError>;
