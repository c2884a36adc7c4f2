use std::sync::Arc;

use retrieval_backend::config::AppConfig;
use retrieval_backend::search::SearchEngine;
use retrieval_backend::storage::DocumentStore;

/// Shared application state / 应用共享状态
pub struct AppState {
    /// In-memory index, owned by this service instance / 内存索引
    pub engine: Arc<SearchEngine>,
    /// Uploaded files on disk / 上传文件存储
    pub store: DocumentStore,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            engine: Arc::new(SearchEngine::new()),
            store: DocumentStore::new(config.get_upload_dir()),
            config,
        }
    }
}
