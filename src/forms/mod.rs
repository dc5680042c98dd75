pub mod biodata_form;
pub mod field_path;
pub mod rows;

use thiserror::Error;

use crate::forms::field_path::ListName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for `{field}`")]
    InvalidValue { field: String, value: String },
    #[error("row {index} out of range for `{list}` ({len} rows)")]
    RowOutOfRange {
        list: ListName,
        index: usize,
        len: usize,
    },
}

pub use biodata_form::BiodataForm;
pub use field_path::{FieldErrors, FieldPath, ScalarField};
