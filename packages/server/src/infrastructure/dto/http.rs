//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// `POST /api/room` form body
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRoomForm {
    pub room: String,
}

/// `POST /api/files/delete` form body
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteFileForm {
    /// Stored name or content identifier
    pub name: String,
}

/// `GET /api/files/download` query
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadQuery {
    /// Stored name or content identifier
    pub name: String,
}

/// One row of the file listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntryDto {
    /// Content identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Stored name, used for download and delete
    pub realname: String,
    pub size: u64,
    /// Last modification time (Unix seconds)
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub success: bool,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRoomResponse {
    pub room: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Stored name of the new file
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
