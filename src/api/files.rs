use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use retrieval_backend::search::{index_batch, tokenizer::parse_stopwords, PendingDocument};
use retrieval_backend::utils::{allowed_file, doc_id_from_filename, secure_filename};

use super::{error_response, ApiError};
use crate::state::AppState;

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    error_response(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e))
}

/// POST /upload-stopwords - 替换停用词集合
pub async fn upload_stopwords(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !allowed_file(&filename, &state.config.storage.allowed_extensions) {
            tracing::warn!("Rejected stopword file: {:?}", filename);
            return Err(error_response(StatusCode::BAD_REQUEST, "Invalid file format"));
        }

        let bytes = field.bytes().await.map_err(bad_request)?;
        let stopwords = parse_stopwords(&String::from_utf8_lossy(&bytes));
        let count = state.engine.set_stopwords(stopwords);

        return Ok(Json(json!({
            "message": "Stopwords uploaded successfully",
            "count": count,
        })));
    }

    Err(error_response(StatusCode::BAD_REQUEST, "No file provided"))
}

/// POST /upload - 上传并索引文档
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let storage = &state.config.storage;
    let mut saw_files_part = false;
    let mut pending: Vec<PendingDocument> = Vec::new();
    // doc_id -> stored file name / 文档ID与文件名
    let mut names: HashMap<String, String> = HashMap::new();
    let mut errors: Vec<String> = Vec::new();

    state.store.ensure_dir().await.map_err(|e| {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Upload directory unavailable: {}", e))
    })?;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some("files[]") {
            continue;
        }
        saw_files_part = true;

        // Parts without a file name are skipped silently / 空文件名直接跳过
        let original = field.file_name().unwrap_or_default().to_string();
        if original.is_empty() {
            continue;
        }
        if !allowed_file(&original, &storage.allowed_extensions) {
            tracing::warn!("Rejected upload: {}", original);
            errors.push(format!("Invalid file type: {}", original));
            continue;
        }

        let filename = secure_filename(&original);
        let doc_id = doc_id_from_filename(&filename);
        if doc_id.is_empty() {
            errors.push(format!("Error saving {}: unusable file name", original));
            continue;
        }
        // Checked before saving so the stored file keeps matching the index
        if names.contains_key(&doc_id) || state.engine.contains(&doc_id) {
            tracing::warn!("Rejected upload {}: document {} already indexed", original, doc_id);
            errors.push(format!("Document {} already indexed: {}", doc_id, original));
            continue;
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                errors.push(format!("Error saving {}: {}", original, e));
                continue;
            }
        };
        match state.store.save(&filename, &bytes).await {
            Ok(path) => {
                pending.push(PendingDocument::from_file(doc_id.clone(), path));
                names.insert(doc_id, filename);
            }
            Err(e) => errors.push(format!("Error saving {}: {}", original, e)),
        }
    }

    if !saw_files_part {
        return Err(error_response(StatusCode::BAD_REQUEST, "No files part"));
    }

    let options = state.config.batch_options();
    let batch_size = state.config.indexing.batch_size.max(1);
    let mut processed = 0;
    let mut results: Vec<Value> = Vec::new();

    while !pending.is_empty() {
        let rest = pending.split_off(batch_size.min(pending.len()));
        let chunk = std::mem::replace(&mut pending, rest);

        let report = index_batch(&state.engine, chunk, options).await;
        processed += report.processed;
        for doc in report.indexed {
            results.push(json!({
                "name": names.get(&doc.doc_id),
                "doc_id": doc.doc_id,
                "excerpt": doc.excerpt,
            }));
        }
        errors.extend(report.errors.iter().map(ToString::to_string));
    }

    Ok(Json(json!({
        "message": "Files processed successfully",
        "processed": processed,
        "errors": errors,
        "results": results,
    })))
}

/// GET /document/:doc_id - 获取文档内容
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.store.read(&doc_id).await {
        Ok(Some(doc)) => Ok(Json(json!({
            "doc_id": doc.doc_id,
            "size": doc.content.chars().count(),
            "content": doc.content,
        }))),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Document ID {} not found", doc_id),
        )),
        Err(e) => {
            tracing::error!("Error retrieving document {}: {}", doc_id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error retrieving document: {}", e),
            ))
        }
    }
}
