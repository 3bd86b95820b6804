//! Schema drift: classification of store errors and the fallback flag.

pub mod classifier;
pub mod fallback;

pub use classifier::{
    is_missing_column_error, is_missing_relation_error, is_structural_error,
    UNDEFINED_COLUMN_CODE, UNDEFINED_RELATION_CODE,
};
pub use fallback::FallbackState;
