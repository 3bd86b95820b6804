//! Schema drift classification.
//!
//! Typed `StoreError` variants answer directly. `StoreError::Remote` payloads
//! from stores that return only message/details/hint text fall through to
//! string heuristics. None of these functions fail.

use harambee_core::errors::{RemoteError, StoreError};

/// SQLSTATE for an undefined relation.
pub const UNDEFINED_RELATION_CODE: &str = "42P01";
/// SQLSTATE for an undefined column.
pub const UNDEFINED_COLUMN_CODE: &str = "42703";
/// PostgREST schema-cache error family (`PGRST200`..`PGRST299`).
const SCHEMA_CACHE_CODE_PREFIX: &str = "PGRST2";

/// Whether `text` contains `ident` as a whole identifier. Qualifiers and
/// quotes split words, so `public.reminders` mentions `reminders` but
/// `paid_invoices` does not mention `id`.
fn mentions_identifier(text: &str, ident: &str) -> bool {
    let ident = ident.trim().to_lowercase();
    !ident.is_empty()
        && text
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|word| word == ident)
}

/// Whether a remote error code names a missing schema object.
fn is_schema_code(code: Option<&str>) -> bool {
    code.is_some_and(|code| {
        code == UNDEFINED_RELATION_CODE
            || code == UNDEFINED_COLUMN_CODE
            || code.to_ascii_uppercase().starts_with(SCHEMA_CACHE_CODE_PREFIX)
    })
}

/// Whether `error` says `column` does not exist in this deployment's schema.
pub fn is_missing_column_error(error: &StoreError, column: &str) -> bool {
    match error {
        StoreError::MissingColumn { column: missing, .. } => missing.eq_ignore_ascii_case(column),
        StoreError::Remote(remote) => remote_mentions_missing_column(remote, column),
        _ => false,
    }
}

fn remote_mentions_missing_column(remote: &RemoteError, column: &str) -> bool {
    let text = remote.searchable_text();
    if !mentions_identifier(&text, column) {
        return false;
    }
    remote.code.as_deref() == Some(UNDEFINED_COLUMN_CODE)
        || text.contains("does not exist")
        || (text.contains("could not find") && text.contains("column"))
        || (text.contains("schema cache") && text.contains("column"))
}

/// Whether `error` says a relation does not exist, optionally narrowed to
/// `relation`.
pub fn is_missing_relation_error(error: &StoreError, relation: Option<&str>) -> bool {
    match error {
        StoreError::MissingRelation { relation: missing } => {
            relation.map_or(true, |wanted| missing.eq_ignore_ascii_case(wanted))
        }
        StoreError::Remote(remote) => {
            let text = remote.searchable_text();
            let undefined = remote.code.as_deref() == Some(UNDEFINED_RELATION_CODE)
                || (text.contains("relation") && text.contains("does not exist"));
            undefined && relation.map_or(true, |wanted| mentions_identifier(&text, wanted))
        }
        _ => false,
    }
}

/// Whether `error` suggests the store's shape differs from what the client
/// expects: typed schema errors, schema error codes, 4xx responses, or text
/// about a column or relation.
pub fn is_structural_error(error: &StoreError) -> bool {
    match error {
        StoreError::MissingColumn { .. } | StoreError::MissingRelation { .. } => true,
        StoreError::Remote(remote) => {
            if is_schema_code(remote.code.as_deref())
                || remote.status.is_some_and(|status| (400..500).contains(&status))
            {
                return true;
            }
            let text = remote.searchable_text();
            text.contains("column") || text.contains("relation")
        }
        StoreError::Backend { message } => {
            let text = message.to_lowercase();
            text.contains("column") || text.contains("relation")
        }
        StoreError::Busy | StoreError::InvalidQuery(_) => false,
    }
}
