use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::storage::{BlobStore, RecordStore};

pub mod routes;

/// Record store behind the API, backend chosen at startup
pub type SharedStore = RecordStore<Box<dyn BlobStore + Send>>;

/// Server state
///
/// Handlers take the lock for a whole read-modify-write cycle, so writes
/// through one server never interleave.
pub struct AppState {
    pub store: Mutex<SharedStore>,
}

impl AppState {
    pub fn new(store: SharedStore) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/students", get(routes::list_students).post(routes::add_student))
        .route(
            "/api/students/{roll}",
            get(routes::get_student)
                .put(routes::update_student)
                .delete(routes::delete_student),
        )
        .route("/api/stats", get(routes::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn start_server(port: u16, store: SharedStore) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, AppState::new(store)).await
}
