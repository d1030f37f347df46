//! Identifier codec for path segments.
//!
//! # Design Decisions
//! - Try the driver's native ObjectId format first, fall back to the
//!   raw string; the fallback is the normal path for caller-assigned
//!   ids, not an error
//! - This keeps lookups transparent whether a collection uses
//!   store-generated or caller-assigned identifiers

use bson::{doc, oid::ObjectId, Bson, Document};

/// Decode a path segment into a store identifier value.
pub fn decode_id(segment: &str) -> Bson {
    match ObjectId::parse_str(segment) {
        Ok(oid) => Bson::ObjectId(oid),
        Err(_) => Bson::String(segment.to_string()),
    }
}

/// Identifier-equality filter for a path segment.
pub fn id_filter(segment: &str) -> Document {
    doc! { "_id": decode_id(segment) }
}
