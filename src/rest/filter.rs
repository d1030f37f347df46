//! Filter construction from the query string.
//!
//! # Responsibilities
//! - Turn ordinary query parameters into equality constraints
//! - Parse the reserved `__filter` parameter as a raw query document
//! - Merge both sources into a single store filter (AND semantics)
//!
//! # Design Decisions
//! - Values stay literal strings; only the JSON literals `true`,
//!   `false` and `null` are coerced, numeric-looking values are not
//! - On overlapping keys the raw filter wins: equality constraints are
//!   inserted first, raw entries second
//! - A malformed raw filter fails the request before the store is hit

use std::collections::HashMap;

use bson::{Bson, Document};

use crate::rest::error::ApiError;

/// Reserved query parameter carrying a raw MongoDB filter document.
pub const RAW_FILTER_PARAM: &str = "__filter";

fn coerce(value: &str) -> Bson {
    match value {
        "true" => Bson::Boolean(true),
        "false" => Bson::Boolean(false),
        "null" => Bson::Null,
        other => Bson::String(other.to_string()),
    }
}

/// Build one store filter from the full set of query parameters.
pub fn build_filter(params: &HashMap<String, String>) -> Result<Document, ApiError> {
    let mut filter = Document::new();

    for (field, value) in params {
        if field != RAW_FILTER_PARAM {
            filter.insert(field.clone(), coerce(value));
        }
    }

    if let Some(raw) = params.get(RAW_FILTER_PARAM) {
        let parsed: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| ApiError::BadRequest(format!("invalid {RAW_FILTER_PARAM}: {e}")))?;
        if !parsed.is_object() {
            return Err(ApiError::BadRequest(format!(
                "invalid {RAW_FILTER_PARAM}: expected a JSON object"
            )));
        }
        let raw_doc = bson::to_document(&parsed)
            .map_err(|e| ApiError::BadRequest(format!("invalid {RAW_FILTER_PARAM}: {e}")))?;

        for (field, constraint) in raw_doc {
            filter.insert(field, constraint);
        }
    }

    Ok(filter)
}
