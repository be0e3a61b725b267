//! Filesystem RoomStore 実装
//!
//! 各ルームはストレージルート直下のディレクトリ 1 つに対応します。
//! ディレクトリ名はサニタイズ済みのルームコードそのものです。

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::{RoomCode, RoomHandle, RoomStore, StorageError};

/// ディレクトリ単位でルームを管理する RoomStore 実装
pub struct FileSystemRoomStore {
    /// 全ルームを格納するルートディレクトリ
    root: PathBuf,
    /// 存在しないルームの作成を許可するか
    allow_create: bool,
}

impl FileSystemRoomStore {
    /// 新しい FileSystemRoomStore を作成
    pub fn new(root: impl Into<PathBuf>, allow_create: bool) -> Self {
        Self {
            root: root.into(),
            allow_create,
        }
    }

    fn handle(&self, code: &RoomCode) -> RoomHandle {
        RoomHandle::new(code.clone(), self.root.join(code.as_str()))
    }
}

#[async_trait]
impl RoomStore for FileSystemRoomStore {
    async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            tracing::error!("Failed to create storage root {}: {}", self.root.display(), e);
            StorageError::Unwritable(format!(
                "cannot create storage root {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    async fn resolve(&self, code: &RoomCode) -> Result<RoomHandle, StorageError> {
        let handle = self.handle(code);
        match fs::metadata(handle.path()).await {
            Ok(meta) if meta.is_dir() => Ok(handle),
            Ok(_) => Err(StorageError::RoomNotFound),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::RoomNotFound),
            Err(e) => {
                tracing::error!("Failed to inspect room {}: {}", handle.path().display(), e);
                Err(StorageError::Unreadable(format!(
                    "cannot inspect room {}: {}",
                    code, e
                )))
            }
        }
    }

    async fn open_or_create(&self, code: &RoomCode) -> Result<RoomHandle, StorageError> {
        match self.resolve(code).await {
            Ok(handle) => return Ok(handle),
            Err(StorageError::RoomNotFound) => {}
            Err(e) => return Err(e),
        }
        if !self.allow_create {
            return Err(StorageError::CreationDisallowed);
        }

        let handle = self.handle(code);
        // create_dir_all treats a directory created concurrently as success
        if let Err(e) = fs::create_dir_all(handle.path()).await {
            if !fs::metadata(handle.path())
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false)
            {
                tracing::error!("Failed to create room directory {}: {}", handle.path().display(), e);
                return Err(StorageError::Unwritable(format!(
                    "cannot create room folder {}: {}",
                    handle.path().display(),
                    e
                )));
            }
        }
        tracing::info!("Room {} created", code);
        Ok(handle)
    }

    async fn destroy_if_empty(&self, room: &RoomHandle) -> bool {
        // remove_dir refuses non-empty directories, so an upload landing after
        // the caller's emptiness check keeps the room alive
        match fs::remove_dir(room.path()).await {
            Ok(()) => {
                tracing::info!("Room {} removed (empty)", room.code());
                true
            }
            Err(e) => {
                tracing::debug!("Room {} kept: {}", room.code(), e);
                false
            }
        }
    }

    async fn list_rooms(&self) -> Result<Vec<RoomHandle>, StorageError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!("Failed to list storage root {}: {}", self.root.display(), e);
                return Err(StorageError::Unreadable(format!(
                    "cannot list storage root {}: {}",
                    self.root.display(),
                    e
                )));
            }
        };

        let mut rooms = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read storage root entry: {}", e);
                    break;
                }
            };
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            let name = entry.file_name();
            if let Some(code) = name.to_str().and_then(RoomCode::from_namespace) {
                rooms.push(RoomHandle::new(code, entry.path()));
            }
        }
        rooms.sort_by(|a, b| a.code().as_str().cmp(b.code().as_str()));
        Ok(rooms)
    }

    fn allows_creation(&self) -> bool {
        self.allow_create
    }
}
