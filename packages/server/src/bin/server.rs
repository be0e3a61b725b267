//! Room-scoped file-sharing server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomdrop-server
//! cargo run --bin roomdrop-server -- --host 0.0.0.0 --port 3000 --storage-root /var/lib/roomdrop
//! ```

use std::sync::Arc;

use clap::Parser;
use roomdrop_server::{
    config::{ServerArgs, ServerConfig},
    domain::RoomStore,
    infrastructure::repository::{
        FileSystemFileRegistry, FileSystemRoomStore, InMemorySessionBinder,
    },
    ui::{Server, state::AppState},
    usecase::{
        AuthorizeRoomUseCase, DeleteFileUseCase, DownloadFileUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, ListFilesUseCase, SweepExpiredFilesUseCase, UploadFileUseCase,
    },
};
use roomdrop_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = match ServerConfig::try_from(ServerArgs::parse()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. UseCases
    // 3. Sweeper
    // 4. Server

    // 1. Create Repositories
    let clock = Arc::new(SystemClock);
    let room_store = Arc::new(FileSystemRoomStore::new(
        config.storage_root.clone(),
        config.allow_create_rooms,
    ));
    if let Err(e) = room_store.ensure_root().await {
        tracing::error!("Storage unavailable: {}", e);
        std::process::exit(1);
    }
    let file_registry = Arc::new(FileSystemFileRegistry::new(
        config.max_file_size,
        clock.clone(),
    ));
    let sessions = Arc::new(InMemorySessionBinder::new(config.session_ttl));
    tracing::info!(
        "Storing rooms under {} (max file size {} bytes, room creation {})",
        config.storage_root.display(),
        config.max_file_size,
        if config.allow_create_rooms { "enabled" } else { "disabled" }
    );

    // 2. Create UseCases
    let app_state = AppState {
        authorize_room_usecase: Arc::new(AuthorizeRoomUseCase::new(
            sessions.clone(),
            room_store.clone(),
        )),
        join_room_usecase: Arc::new(JoinRoomUseCase::new(
            room_store.clone(),
            sessions.clone(),
            config.room_code_policy,
        )),
        leave_room_usecase: Arc::new(LeaveRoomUseCase::new(sessions.clone())),
        list_files_usecase: Arc::new(ListFilesUseCase::new(file_registry.clone())),
        upload_file_usecase: Arc::new(UploadFileUseCase::new(file_registry.clone())),
        download_file_usecase: Arc::new(DownloadFileUseCase::new(file_registry.clone())),
        delete_file_usecase: Arc::new(DeleteFileUseCase::new(file_registry.clone())),
        session_ttl: config.session_ttl,
    };

    // 3. Start the retention sweeper (first sweep runs immediately)
    let sweeper = Arc::new(SweepExpiredFilesUseCase::new(
        room_store,
        file_registry,
        clock,
        config.retention_hours,
    ));
    tokio::spawn(sweeper.run_periodically(config.sweep_interval));

    // 4. Create and run the server
    let server = Server::new(app_state, config.max_file_size);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
