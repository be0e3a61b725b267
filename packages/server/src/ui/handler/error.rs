//! Conversion of use case errors into HTTP responses.

use axum::{
    Json,
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::StorageError,
    infrastructure::dto::http::ErrorResponse,
    usecase::{FileOperationError, JoinRoomError},
};

/// Error response: a status code and a `{ "error": ... }` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::RoomNotFound => Self::new(StatusCode::NOT_FOUND, "Room not found"),
            StorageError::CreationDisallowed => Self::bad_request(error.to_string()),
            StorageError::FileNotFound => Self::new(StatusCode::NOT_FOUND, error.to_string()),
            StorageError::InvalidName(_) => Self::bad_request("Invalid file name"),
            StorageError::TooLarge { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, error.to_string())
            }
            StorageError::UploadTransport(_) => Self::bad_request(error.to_string()),
            // the repository already logged the detail; callers get a generic message
            StorageError::Unwritable(_) => Self::internal("Could not save file."),
            StorageError::Unreadable(_) => Self::internal("Storage unavailable."),
        }
    }
}

impl From<JoinRoomError> for ApiError {
    fn from(error: JoinRoomError) -> Self {
        match error {
            JoinRoomError::InvalidRoomCode(e) => Self::bad_request(e.to_string()),
            JoinRoomError::CreationDisallowed => Self::bad_request(error.to_string()),
            JoinRoomError::Storage(e) => e.into(),
        }
    }
}

impl From<FileOperationError> for ApiError {
    fn from(error: FileOperationError) -> Self {
        match error {
            FileOperationError::Unauthorized => {
                Self::new(StatusCode::UNAUTHORIZED, error.to_string())
            }
            FileOperationError::Storage(e) => e.into(),
        }
    }
}

/// フォームの解析失敗も `{ "error": ... }` 形式の 400 にする
impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::bad_request(format!("Invalid request: {}", rejection.body_text()))
    }
}

/// クエリ文字列の解析失敗も `{ "error": ... }` 形式の 400 にする
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(format!("Invalid request: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomCodeError;

    #[test]
    fn test_unauthorized_is_distinct_from_not_found() {
        // テスト項目: 未認可は 401、ファイルなしは 404
        let unauthorized: ApiError = FileOperationError::Unauthorized.into();
        let not_found: ApiError = FileOperationError::Storage(StorageError::FileNotFound).into();

        assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
        assert_eq!(unauthorized.message, "Invalid room");
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_creation_disallowed_looks_like_invalid_code() {
        // テスト項目: 作成禁止は「無効なコード」として返され、存在有無を区別させない
        let error: ApiError = JoinRoomError::CreationDisallowed.into();

        assert_eq!(error, ApiError::bad_request("Room code invalid."));
    }

    #[test]
    fn test_invalid_room_code_names_the_bound() {
        let error: ApiError = JoinRoomError::InvalidRoomCode(RoomCodeError::TooShort { min: 4 }).into();

        assert_eq!(
            error,
            ApiError::bad_request("Room code too short (min 4 characters)")
        );
    }

    #[test]
    fn test_storage_detail_is_not_leaked() {
        // テスト項目: ストレージ障害の詳細は呼び出し元に返さない
        let error: ApiError = StorageError::Unwritable("/srv/rooms/abcd: permission denied".into()).into();

        assert_eq!(error, ApiError::internal("Could not save file."));
    }

    #[test]
    fn test_too_large_carries_limit() {
        let error: ApiError = StorageError::TooLarge {
            limit: 50 * 1024 * 1024,
        }
        .into();

        assert_eq!(
            error,
            ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "File too large (max 50MB)")
        );
    }
}
