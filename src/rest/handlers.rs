//! Resource handler set: the five operations on a collection.
//!
//! # Responsibilities
//! - Decode path segments and query strings into store operations
//! - Map store outcomes (hit, miss, failure) to HTTP responses
//! - Render BSON documents as plain JSON
//!
//! # Design Decisions
//! - Bodies are opaque JSON objects passed through to the store;
//!   validation is deliberately shallow
//! - Update is a merge: only the provided fields change, and `_id` is
//!   stripped from the body so identity is never altered
//! - ObjectId values render as their hex string, matching what clients
//!   of the original driver receive

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bson::{Bson, Document};
use serde_json::{json, Value};

use crate::rest::error::ApiError;
use crate::rest::filter::build_filter;
use crate::rest::id::id_filter;
use crate::rest::MountState;

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(field, value)| (field, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn document_to_json(document: Document) -> Value {
    bson_to_json(Bson::Document(document))
}

fn json_to_document(body: &Value) -> Result<Document, ApiError> {
    if !body.is_object() {
        return Err(ApiError::BadRequest(
            "request body must be a JSON object".into(),
        ));
    }
    bson::to_document(body).map_err(|e| ApiError::BadRequest(format!("invalid body: {e}")))
}

/// GET /{collection} — list documents matching the query-string filter.
pub async fn list(
    State(state): State<MountState>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let filter = build_filter(&params)?;
    tracing::debug!(prefix = %state.prefix, collection = %collection, filter = %filter, "List");

    let documents = state.store.find(&collection, filter).await?;

    Ok(Json(Value::Array(
        documents.into_iter().map(document_to_json).collect(),
    )))
}

/// GET /{collection}/{id} — fetch one document by identifier.
pub async fn get_one(
    State(state): State<MountState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let document = state
        .store
        .find_one(&collection, id_filter(&id))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(document_to_json(document)))
}

/// POST /{collection} — insert the body as a new document.
pub async fn create(
    State(state): State<MountState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut document = json_to_document(&body)?;

    let inserted_id = state.store.insert_one(&collection, document.clone()).await?;
    tracing::debug!(prefix = %state.prefix, collection = %collection, id = %inserted_id, "Created");

    if !document.contains_key("_id") {
        document.insert("_id", inserted_id);
    }

    Ok((StatusCode::CREATED, Json(document_to_json(document))))
}

/// PUT/PATCH /{collection}/{id} — merge the body into an existing document.
pub async fn update(
    State(state): State<MountState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut fields = json_to_document(&body)?;
    fields.remove("_id");

    let filter = id_filter(&id);
    if !fields.is_empty() {
        let matched = state
            .store
            .update_one(&collection, filter.clone(), fields)
            .await?;
        if matched == 0 {
            return Err(ApiError::NotFound);
        }
    }

    let updated = state
        .store
        .find_one(&collection, filter)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(document_to_json(updated)))
}

/// DELETE /{collection}/{id} — remove one document by identifier.
pub async fn remove(
    State(state): State<MountState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.store.delete_one(&collection, id_filter(&id)).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(prefix = %state.prefix, collection = %collection, id = %id, "Deleted");

    Ok(Json(json!({ "deletedCount": deleted })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[test]
    fn object_ids_render_as_hex_strings() {
        let oid = ObjectId::new();
        let json = document_to_json(doc! { "_id": oid, "n": 1 });
        assert_eq!(json["_id"], Value::String(oid.to_hex()));
        assert_eq!(json["n"], json!(1));
    }

    #[test]
    fn nested_values_survive_rendering() {
        let json = document_to_json(doc! {
            "name": "x",
            "tags": ["a", "b"],
            "inner": { "flag": true, "score": 1.1 },
        });
        assert_eq!(json["tags"], json!(["a", "b"]));
        assert_eq!(json["inner"]["flag"], json!(true));
        assert_eq!(json["inner"]["score"], json!(1.1));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(json_to_document(&json!(["not", "an", "object"])).is_err());
        assert!(json_to_document(&json!("plain string")).is_err());
        assert!(json_to_document(&json!({ "ok": 1 })).is_ok());
    }
}
