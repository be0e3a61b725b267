//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        current_room, delete_file, download_file, health_check, join_room, join_room_via_link,
        leave_room, list_files, upload_file,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// File-sharing HTTP server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, config.max_file_size);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    /// Maximum upload size in bytes
    max_file_size: u64,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `app_state` - UseCases shared by the handlers
    /// * `max_file_size` - Maximum upload size in bytes
    pub fn new(app_state: AppState, max_file_size: u64) -> Self {
        Self {
            app_state: Arc::new(app_state),
            max_file_size,
        }
    }

    /// Build the router with every endpoint mounted
    pub fn router(&self) -> Router {
        // the registry enforces the exact limit while streaming; this only
        // has to stay above it so the 413 carries the registry's message
        let upload_limit = usize::try_from(self.max_file_size)
            .unwrap_or(usize::MAX)
            .saturating_add(MULTIPART_OVERHEAD);

        Router::new()
            // ルーム
            .route("/api/room", get(current_room).post(join_room))
            .route("/join/{room}", get(join_room_via_link))
            .route("/leave", get(leave_room))
            // ファイル
            .route(
                "/api/files",
                get(list_files)
                    .post(upload_file)
                    .layer(DefaultBodyLimit::max(upload_limit)),
            )
            .route("/api/files/download", get(download_file))
            .route("/api/files/delete", post(delete_file))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("File-sharing server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
