use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use retrieval_backend::search::QueryType;
use retrieval_backend::SearchError;

use super::{error_response, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// Missing means "boolean"; an explicit null is echoed back as null
    #[serde(default = "default_type", rename = "type")]
    pub query_type: Option<String>,
}

fn default_type() -> Option<String> {
    Some("boolean".to_string())
}

/// POST /search - 布尔或邻近查询
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Value>, ApiError> {
    let query = req.query.trim();
    let query_type = QueryType::from_name(req.query_type.as_deref().unwrap_or_default());

    match state.engine.search(query, query_type) {
        Ok(results) => Ok(Json(json!({
            "results": results,
            "query": query,
            "type": req.query_type,
        }))),
        Err(e) if e.is_client_error() => Err(error_response(StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            tracing::error!("Search failed for {:?}: {}", query, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Search error: {}", e),
            ))
        }
    }
}

/// POST /clear - 清空索引和上传文件
pub async fn clear_indexes(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.engine.clear();

    // Index is already empty; a file error is still reported / 删除上传文件
    state.store.clear().await.map_err(|e: SearchError| {
        tracing::error!("Failed to clear uploads: {}", e);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error clearing indexes: {}", e),
        )
    })?;

    Ok(Json(json!({ "message": "All indexes and files cleared successfully" })))
}

/// GET /status - 索引统计
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let stats = state.engine.stats();
    Json(json!({
        "processed_files": stats.processed_files,
        "unique_terms": stats.unique_terms,
        "stopwords_count": stats.stopwords_count,
        "last_updated": stats.last_updated.and_then(|ts| {
            chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.to_rfc3339())
        }),
    }))
}
