//! Configuration loading errors.

use super::error_code::{self, HarambeeErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl HarambeeErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => error_code::CONFIG_ERROR,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::TomlParse(_) => error_code::CONFIG_PARSE_ERROR,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
