//! Integration tests for the HTTP API, served in-process on an ephemeral port.

use std::{sync::Arc, time::Duration};

use reqwest::{
    Client, StatusCode,
    multipart::{Form, Part},
    redirect::Policy,
};
use roomdrop_server::{
    infrastructure::{
        dto::http::{
            CurrentRoomResponse, ErrorResponse, FileEntryDto, JoinRoomResponse, SuccessResponse,
            UploadResponse,
        },
        repository::{FileSystemFileRegistry, FileSystemRoomStore, InMemorySessionBinder},
    },
    ui::{Server, state::AppState},
    usecase::{
        AuthorizeRoomUseCase, DeleteFileUseCase, DownloadFileUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, ListFilesUseCase, UploadFileUseCase,
    },
};
use roomdrop_shared::time::SystemClock;
use tempfile::TempDir;

const MAX_FILE_SIZE: u64 = 1024;
const SESSION_TTL: Duration = Duration::from_secs(600);

/// Helper struct holding a running server and its storage root
struct TestServer {
    storage: TempDir,
    base_url: String,
}

impl TestServer {
    /// Start a server backed by a fresh temporary directory
    async fn start(allow_create: bool) -> Self {
        let storage = TempDir::new().unwrap();
        let room_store = Arc::new(FileSystemRoomStore::new(storage.path(), allow_create));
        let file_registry = Arc::new(FileSystemFileRegistry::new(
            MAX_FILE_SIZE,
            Arc::new(SystemClock),
        ));
        let sessions = Arc::new(InMemorySessionBinder::new(SESSION_TTL));

        let app_state = AppState {
            authorize_room_usecase: Arc::new(AuthorizeRoomUseCase::new(
                sessions.clone(),
                room_store.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                room_store,
                sessions.clone(),
                Default::default(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(sessions)),
            list_files_usecase: Arc::new(ListFilesUseCase::new(file_registry.clone())),
            upload_file_usecase: Arc::new(UploadFileUseCase::new(file_registry.clone())),
            download_file_usecase: Arc::new(DownloadFileUseCase::new(file_registry.clone())),
            delete_file_usecase: Arc::new(DeleteFileUseCase::new(file_registry)),
            session_ttl: SESSION_TTL,
        };
        let app = Server::new(app_state, MAX_FILE_SIZE).router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            storage,
            base_url: format!("http://{}", addr),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A browser-like client: keeps cookies, does not follow redirects
    fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    async fn join(&self, client: &Client, room: &str) -> reqwest::Response {
        client
            .post(self.url("/api/room"))
            .form(&[("room", room)])
            .send()
            .await
            .unwrap()
    }

    async fn upload(&self, client: &Client, filename: &str, body: Vec<u8>) -> reqwest::Response {
        let form = Form::new().part("file", Part::bytes(body).file_name(filename.to_string()));
        client
            .post(self.url("/api/files"))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    async fn list(&self, client: &Client) -> Vec<FileEntryDto> {
        let response = client.get(self.url("/api/files")).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start(true).await;

    let response = server
        .client()
        .get(server.url("/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_file_lifecycle_in_one_room() {
    // テスト項目: 参加 → アップロード → 一覧 → ダウンロード → 削除 の一連の流れ
    // given (前提条件):
    let server = TestServer::start(true).await;
    let client = server.client();

    // when (操作): ルームに参加
    let response = server.join(&client, " Team 42 ").await;

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let joined: JoinRoomResponse = response.json().await.unwrap();
    assert_eq!(joined.room, "Team42");
    assert!(server.storage.path().join("Team42").is_dir());

    // when (操作): アップロード
    let response = server
        .upload(&client, "report (final).pdf", b"hello room".to_vec())
        .await;

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded: UploadResponse = response.json().await.unwrap();
    assert!(uploaded.success);
    assert!(uploaded.name.ends_with("_report_final_.pdf"));

    let files = server.list(&client).await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "report_final_.pdf");
    assert_eq!(files[0].realname, uploaded.name);
    assert_eq!(files[0].size, 10);

    // when (操作): ダウンロード
    let response = client
        .get(server.url("/api/files/download"))
        .query(&[("name", uploaded.name.as_str())])
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"report_final_.pdf\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"hello room");

    // when (操作): 削除
    let response = client
        .post(server.url("/api/files/delete"))
        .form(&[("name", uploaded.name.as_str())])
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let deleted: SuccessResponse = response.json().await.unwrap();
    assert!(deleted.success);
    assert!(server.list(&client).await.is_empty());
}

#[tokio::test]
async fn test_download_by_content_id() {
    let server = TestServer::start(true).await;
    let client = server.client();
    server.join(&client, "alpha").await;
    server.upload(&client, "a.txt", b"abc".to_vec()).await;
    let id = server.list(&client).await[0].id.clone();

    let response = client
        .get(server.url("/api/files/download"))
        .query(&[("name", id.as_str())])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"abc");
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    // テスト項目: 別のルームのファイルは見えない
    // given (前提条件):
    let server = TestServer::start(true).await;
    let alice = server.client();
    let bob = server.client();
    server.join(&alice, "alpha").await;
    server.join(&bob, "bravo").await;

    // when (操作):
    server.upload(&alice, "secret.txt", b"s".to_vec()).await;

    // then (期待する結果):
    assert_eq!(server.list(&alice).await.len(), 1);
    assert!(server.list(&bob).await.is_empty());
}

#[tokio::test]
async fn test_file_operations_require_a_room() {
    // テスト項目: ルーム未参加のセッションは 4 つのファイル操作すべてが 401 になり、ストレージに触れない
    // given (前提条件): 別の利用者が alpha にファイルを置いている
    let server = TestServer::start(true).await;
    let owner = server.client();
    server.join(&owner, "alpha").await;
    let uploaded: UploadResponse = server
        .upload(&owner, "keep.txt", b"keep".to_vec())
        .await
        .json()
        .await
        .unwrap();
    let kept = server.storage.path().join("alpha").join(&uploaded.name);
    let client = server.client();

    // when (操作):
    let list = client.get(server.url("/api/files")).send().await.unwrap();
    let upload = server.upload(&client, "a.txt", b"a".to_vec()).await;
    let download = client
        .get(server.url("/api/files/download"))
        .query(&[("name", uploaded.name.as_str())])
        .send()
        .await
        .unwrap();
    let delete = client
        .post(server.url("/api/files/delete"))
        .form(&[("name", uploaded.name.as_str())])
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    for response in [list, upload, download, delete] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = response.json().await.unwrap();
        assert_eq!(error.error, "Invalid room");
    }
    assert!(kept.exists());
    let entries: Vec<_> = std::fs::read_dir(server.storage.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("alpha")]);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    // テスト項目: 必須フィールドが欠けたリクエストも JSON の {error} で 400 になる
    // given (前提条件):
    let server = TestServer::start(true).await;
    let client = server.client();
    server.join(&client, "alpha").await;

    // when (操作):
    let join = client
        .post(server.url("/api/room"))
        .form(&[("code", "alpha")])
        .send()
        .await
        .unwrap();
    let download = client
        .get(server.url("/api/files/download"))
        .send()
        .await
        .unwrap();
    let delete = client
        .post(server.url("/api/files/delete"))
        .form(&[("file", "1_a.txt")])
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    for response in [join, download, delete] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let error: ErrorResponse = response.json().await.unwrap();
        assert!(error.error.starts_with("Invalid request"), "{}", error.error);
    }
}

#[tokio::test]
async fn test_session_cookie_expires_with_binding() {
    // テスト項目: セッション Cookie の Max-Age はバインディングの無操作期限と一致する
    let server = TestServer::start(true).await;

    let response = server.join(&server.client(), "alpha").await;

    let cookie = response.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with("roomdrop_session="), "{}", cookie);
    assert!(cookie.contains("HttpOnly"), "{}", cookie);
    assert!(
        cookie.contains(&format!("Max-Age={}", SESSION_TTL.as_secs())),
        "{}",
        cookie
    );
}

#[tokio::test]
async fn test_invalid_room_codes() {
    let server = TestServer::start(true).await;
    let client = server.client();

    let short = server.join(&client, "a-b").await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = short.json().await.unwrap();
    assert_eq!(error.error, "Room code too short (min 4 characters)");

    let long = server.join(&client, &"x".repeat(33)).await;
    assert_eq!(long.status(), StatusCode::BAD_REQUEST);

    let current: CurrentRoomResponse = client
        .get(server.url("/api/room"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.room, None);
}

#[tokio::test]
async fn test_creation_disallowed() {
    // テスト項目: 作成禁止時は既存のルームにのみ参加できる
    let server = TestServer::start(false).await;
    std::fs::create_dir(server.storage.path().join("existing")).unwrap();
    let client = server.client();

    let missing = server.join(&client, "missing").await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = missing.json().await.unwrap();
    assert_eq!(error.error, "Room code invalid.");
    assert!(!server.storage.path().join("missing").exists());

    let existing = server.join(&client, "existing").await;
    assert_eq!(existing.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_oversize_upload_is_rejected() {
    // テスト項目: 上限 + 1 バイトのアップロードは 413 で、ファイルは残らない
    let server = TestServer::start(true).await;
    let client = server.client();
    server.join(&client, "alpha").await;

    let response = server
        .upload(&client, "big.bin", vec![0u8; MAX_FILE_SIZE as usize + 1])
        .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(server.list(&client).await.is_empty());
    let room_dir = server.storage.path().join("alpha");
    assert_eq!(std::fs::read_dir(room_dir).unwrap().count(), 0);

    let exact = server
        .upload(&client, "fits.bin", vec![0u8; MAX_FILE_SIZE as usize])
        .await;
    assert_eq!(exact.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_without_file() {
    let server = TestServer::start(true).await;
    let client = server.client();
    server.join(&client, "alpha").await;

    let form = Form::new().text("note", "no file here");
    let response = client
        .post(server.url("/api/files"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json().await.unwrap();
    assert_eq!(error.error, "No file selected");
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    // テスト項目: ルーム外を指すファイル名は拒否され、ルーム外のファイルは消えない
    // given (前提条件):
    let server = TestServer::start(true).await;
    let client = server.client();
    server.join(&client, "alpha").await;
    server.join(&server.client(), "bravo").await;
    let victim = server.storage.path().join("bravo").join("1_keep.txt");
    std::fs::write(&victim, b"keep").unwrap();

    // when (操作):
    let download = client
        .get(server.url("/api/files/download"))
        .query(&[("name", "../bravo/1_keep.txt")])
        .send()
        .await
        .unwrap();
    let delete = client
        .post(server.url("/api/files/delete"))
        .form(&[("name", "../bravo/1_keep.txt")])
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(download.status(), StatusCode::BAD_REQUEST);
    assert_eq!(delete.status(), StatusCode::BAD_REQUEST);
    assert!(victim.exists());
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let server = TestServer::start(true).await;
    let client = server.client();
    server.join(&client, "alpha").await;

    let response = client
        .post(server.url("/api/files/delete"))
        .form(&[("name", "1_ghost.txt")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json().await.unwrap();
    assert_eq!(error.error, "File not found");
}

#[tokio::test]
async fn test_share_link_and_leave() {
    // テスト項目: 共有リンクで参加し、退出後はファイル操作ができない
    // given (前提条件):
    let server = TestServer::start(true).await;
    let client = server.client();

    // when (操作): 共有リンク
    let response = client.get(server.url("/join/alpha")).send().await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    let current: CurrentRoomResponse = client
        .get(server.url("/api/room"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.room.as_deref(), Some("alpha"));

    // when (操作): 退出
    let response = client.get(server.url("/leave")).send().await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let list = client.get(server.url("/api/files")).send().await.unwrap();
    assert_eq!(list.status(), StatusCode::UNAUTHORIZED);
}
