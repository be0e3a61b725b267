//! Filesystem FileRegistry 実装
//!
//! アップロードはルームディレクトリ内の隠しテンポラリファイルに書き込まれ、
//! 書き込み完了後にハードリンクで保存名へ公開されます。ハードリンクは既存の
//! 名前を上書きしないため、同一秒・同一名のアップロードが衝突しても先行する
//! ファイルの内容は失われません。

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::{fs, io::AsyncWriteExt};
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use roomdrop_shared::time::Clock;

use super::unix_secs;
use crate::domain::{
    ContentStream, FileDownload, FileEntry, FileRegistry, RoomHandle, StorageError, StoredName,
    is_content_id, sanitize_filename, value_object::with_collision_suffix,
};

/// Prefix of in-flight upload files; hidden from listings
const TEMP_PREFIX: &str = ".upload-";

/// Upper bound on collision suffixes tried for one upload
const MAX_NAME_ATTEMPTS: usize = 1000;

/// ファイルをディレクトリ内に保存する FileRegistry 実装
pub struct FileSystemFileRegistry {
    /// アップロード 1 件あたりの最大バイト数
    max_file_size: u64,
    /// 保存名のプレフィックスに使う時計
    clock: Arc<dyn Clock>,
}

impl FileSystemFileRegistry {
    /// 新しい FileSystemFileRegistry を作成
    pub fn new(max_file_size: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_file_size,
            clock,
        }
    }

    fn too_large(&self) -> StorageError {
        StorageError::TooLarge {
            limit: self.max_file_size,
        }
    }

    /// Stream the upload into `temp_path`, enforcing the size limit chunk by chunk.
    async fn write_temp(
        &self,
        room: &RoomHandle,
        temp_path: &Path,
        content: &mut ContentStream<'_>,
    ) -> Result<u64, StorageError> {
        let mut file = match fs::File::create_new(temp_path).await {
            Ok(file) => file,
            // the sweeper may have reclaimed the room since it was resolved
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(room.path())
                    .await
                    .map_err(|e| unwritable(room.path(), e))?;
                fs::File::create_new(temp_path)
                    .await
                    .map_err(|e| unwritable(temp_path, e))?
            }
            Err(e) => return Err(unwritable(temp_path, e)),
        };

        let mut written: u64 = 0;
        while let Some(chunk) = content.next().await {
            let chunk = chunk.map_err(|e| StorageError::UploadTransport(e.to_string()))?;
            written += chunk.len() as u64;
            if written > self.max_file_size {
                return Err(self.too_large());
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| unwritable(temp_path, e))?;
        }
        file.flush().await.map_err(|e| unwritable(temp_path, e))?;
        file.sync_all().await.map_err(|e| unwritable(temp_path, e))?;

        Ok(written)
    }

    /// Publish the finished temp file under a fresh stored name.
    async fn publish(
        &self,
        room: &RoomHandle,
        temp_path: &Path,
        sanitized_name: &str,
    ) -> Result<StoredName, StorageError> {
        let ingested_at = self.clock.now_unix_secs();

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = if attempt == 1 {
                StoredName::compose(ingested_at, sanitized_name)
            } else {
                StoredName::compose(
                    ingested_at,
                    &with_collision_suffix(sanitized_name, attempt),
                )
            };
            let target = room.path().join(candidate.as_str());
            match fs::hard_link(temp_path, &target).await {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("Stored name {} taken, trying next", candidate);
                }
                Err(e) => return Err(unwritable(&target, e)),
            }
        }

        tracing::error!(
            "No free stored name for {} in room {} after {} attempts",
            sanitized_name,
            room.code(),
            MAX_NAME_ATTEMPTS
        );
        Err(StorageError::Unwritable(format!(
            "no free stored name for {} in room {}",
            sanitized_name,
            room.code()
        )))
    }

    /// Resolve a stored name or content identifier to an existing file.
    async fn locate(
        &self,
        room: &RoomHandle,
        identifier: &str,
    ) -> Result<(StoredName, PathBuf), StorageError> {
        let token = StoredName::parse(identifier)?;
        let path = room.path().join(token.as_str());
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => return Ok((token, path)),
            Ok(_) => return Err(StorageError::FileNotFound),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(unreadable(&path, e)),
        }

        if is_content_id(identifier) {
            if let Some(entry) = self
                .list(room)
                .await?
                .into_iter()
                .find(|entry| entry.content_id == identifier)
            {
                let path = room.path().join(entry.stored_name.as_str());
                return Ok((entry.stored_name, path));
            }
        }

        Err(StorageError::FileNotFound)
    }
}

#[async_trait]
impl FileRegistry for FileSystemFileRegistry {
    async fn list(&self, room: &RoomHandle) -> Result<Vec<FileEntry>, StorageError> {
        let mut dir = match fs::read_dir(room.path()).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(unreadable(room.path(), e)),
        };

        // (modified time, entry) so ordering uses full timestamp precision
        let mut files = Vec::new();
        while let Some(item) = dir
            .next_entry()
            .await
            .map_err(|e| unreadable(room.path(), e))?
        {
            let Some(name) = item.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let Ok(stored_name) = StoredName::parse(&name) else {
                continue;
            };
            // the entry may vanish between listing and stat
            let Ok(meta) = item.metadata().await else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified().map_err(|e| unreadable(&item.path(), e))?;
            files.push((
                modified,
                FileEntry::new(stored_name, meta.len(), unix_secs(modified)),
            ));
        }

        files.sort_by(|(a_time, a), (b_time, b)| {
            b_time
                .cmp(a_time)
                .then_with(|| b.stored_name.cmp(&a.stored_name))
        });
        Ok(files.into_iter().map(|(_, entry)| entry).collect())
    }

    async fn store<'a>(
        &self,
        room: &RoomHandle,
        original_name: &str,
        declared_size: Option<u64>,
        mut content: ContentStream<'a>,
    ) -> Result<FileEntry, StorageError> {
        if declared_size.is_some_and(|size| size > self.max_file_size) {
            return Err(self.too_large());
        }
        let sanitized = sanitize_filename(original_name);
        if sanitized.is_empty() {
            return Err(StorageError::InvalidName(original_name.to_string()));
        }

        let temp_path = room
            .path()
            .join(format!("{}{}.part", TEMP_PREFIX, Uuid::new_v4()));
        let written = match self.write_temp(room, &temp_path, &mut content).await {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e);
            }
        };

        let published = self.publish(room, &temp_path, &sanitized).await;
        if let Err(e) = fs::remove_file(&temp_path).await {
            tracing::warn!("Failed to remove temp file {}: {}", temp_path.display(), e);
        }
        let stored_name = published?;

        let path = room.path().join(stored_name.as_str());
        let modified_at = match fs::metadata(&path).await.and_then(|m| m.modified()) {
            Ok(modified) => unix_secs(modified),
            Err(_) => self.clock.now_unix_secs(),
        };

        tracing::info!(
            room = %room.code(),
            stored_name = %stored_name,
            size_bytes = written,
            "File stored"
        );
        Ok(FileEntry::new(stored_name, written, modified_at))
    }

    async fn delete(&self, room: &RoomHandle, identifier: &str) -> Result<(), StorageError> {
        let (stored_name, path) = self.locate(room, identifier).await?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(room = %room.code(), stored_name = %stored_name, "File deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::FileNotFound),
            Err(e) => Err(unwritable(&path, e)),
        }
    }

    async fn fetch_for_download(
        &self,
        room: &RoomHandle,
        identifier: &str,
    ) -> Result<FileDownload, StorageError> {
        let (stored_name, path) = self.locate(room, identifier).await?;
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::FileNotFound),
            Err(e) => return Err(unreadable(&path, e)),
        };
        let size = file
            .metadata()
            .await
            .map_err(|e| unreadable(&path, e))?
            .len();

        Ok(FileDownload {
            display_name: stored_name.display_name().to_string(),
            size,
            content: ReaderStream::new(file).boxed(),
        })
    }

    async fn remove_expired(&self, room: &RoomHandle, cutoff: i64) -> usize {
        let mut dir = match fs::read_dir(room.path()).await {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!("Skipping room {}: {}", room.code(), e);
                return 0;
            }
        };

        let mut removed = 0;
        loop {
            let item = match dir.next_entry().await {
                Ok(Some(item)) => item,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to scan room {}: {}", room.code(), e);
                    break;
                }
            };
            let Ok(meta) = item.metadata().await else {
                continue;
            };
            let Ok(modified) = meta.modified() else {
                continue;
            };
            if !meta.is_file() || unix_secs(modified) >= cutoff {
                continue;
            }
            match fs::remove_file(item.path()).await {
                Ok(()) => {
                    removed += 1;
                    tracing::debug!("Expired {} in room {}", item.path().display(), room.code());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("Failed to remove expired {}: {}", item.path().display(), e);
                }
            }
        }
        removed
    }
}

fn unwritable(path: &Path, e: std::io::Error) -> StorageError {
    tracing::error!("Storage write failed at {}: {}", path.display(), e);
    StorageError::Unwritable(format!("{}: {}", path.display(), e))
}

fn unreadable(path: &Path, e: std::io::Error) -> StorageError {
    tracing::error!("Storage read failed at {}: {}", path.display(), e);
    StorageError::Unreadable(format!("{}: {}", path.display(), e))
}
