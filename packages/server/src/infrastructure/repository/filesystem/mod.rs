//! Filesystem-as-database storage: one directory per room, one file per upload.

mod file;
mod room;

pub use file::FileSystemFileRegistry;
pub use room::FileSystemRoomStore;

use std::time::{SystemTime, UNIX_EPOCH};

/// Unix seconds of a filesystem timestamp, clamped to the epoch.
pub(crate) fn unix_secs(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
