use std::{sync::Arc, time::Duration};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::CONTENT_TYPE, Method},
    routing::post,
    Json, Router,
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::{ImageSource, ProxyConfig, SearchError, SearchRequest, SearchResponse};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ImageSource>,
}

pub fn router(source: Arc<dyn ImageSource>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/search-images", post(search_images))
        .layer(cors)
        .with_state(AppState { source })
}

pub async fn search_images(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, SearchError> {
    let Json(request) = payload.map_err(|e| SearchError::MalformedPayload(e.body_text()))?;
    let query = request.query().ok_or(SearchError::MissingQuery)?;

    info!("Searching images for {query:?}");
    let images = state.source.search(query).await?;
    Ok(Json(SearchResponse { images }))
}

pub async fn serve(config: &ProxyConfig, source: Arc<dyn ImageSource>) -> Result<(), SearchError> {
    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| SearchError::Config(format!("Unable to bind {address}: {e}")))?;
    info!("Image proxy running on {address}");

    axum::serve(listener, router(source))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SearchError::Config(format!("Server error: {e}")))?;

    info!("Image proxy shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
