use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use retrieval_backend::config;
use state::AppState;

/// Build the HTTP router / 构建路由
pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.storage.max_content_length;

    Router::new()
        .route("/api/health", get(api::server::health_check))
        .route("/upload-stopwords", post(api::files::upload_stopwords))
        .route("/upload", post(api::files::upload_files))
        .route("/search", post(api::search::search))
        .route("/clear", post(api::search::clear_indexes))
        .route("/document/:doc_id", get(api::files::get_document))
        .route("/status", get(api::search::get_status))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retrieval_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    let state = Arc::new(AppState::new(app_config));

    // Create upload directory if not exists / 创建上传目录
    state.store.ensure_dir().await?;
    tracing::info!("Upload directory: {:?}", state.store.root());

    let bind_addr = state.config.get_bind_address();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Retrieval server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
