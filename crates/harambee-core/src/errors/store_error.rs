//! Errors returned at the backing-store boundary.
//!
//! Adapters that know their backend map failures to the typed schema
//! variants (`MissingColumn`, `MissingRelation`). Backends that only hand back
//! a message/details/hint payload produce `Remote`, which is classified by
//! text heuristics further up.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error_code::{self, HarambeeErrorCode};

/// Unstructured error payload from a remote query endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// Backend error code (e.g. SQLSTATE `42703`, `42P01`).
    pub code: Option<String>,
    /// HTTP status of the response, when the store speaks HTTP.
    pub status: Option<u16>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Message, details, and hint joined and lowercased for matching.
    pub fn searchable_text(&self) -> String {
        let mut text = self.message.to_lowercase();
        for part in [&self.details, &self.hint].into_iter().flatten() {
            text.push(' ');
            text.push_str(&part.to_lowercase());
        }
        text
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("column {column} does not exist")]
    MissingColumn {
        relation: Option<String>,
        column: String,
    },

    #[error("relation {relation} does not exist")]
    MissingRelation { relation: String },

    #[error("remote store error: {0}")]
    Remote(RemoteError),

    #[error("store busy (another operation in progress)")]
    Busy,

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("store error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Whether the error is a typed schema-shape error.
    pub fn is_schema_shape(&self) -> bool {
        matches!(self, Self::MissingColumn { .. } | Self::MissingRelation { .. })
    }
}

impl HarambeeErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::SCHEMA_MISSING_COLUMN,
            Self::MissingRelation { .. } => error_code::SCHEMA_MISSING_RELATION,
            Self::Remote(_) => error_code::REMOTE_ERROR,
            Self::Busy => error_code::STORE_BUSY,
            Self::InvalidQuery(_) => error_code::INVALID_QUERY,
            Self::Backend { .. } => error_code::STORE_ERROR,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
