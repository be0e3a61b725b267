//! Room membership and health endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    infrastructure::dto::http::{CurrentRoomResponse, JoinRoomForm, JoinRoomResponse},
    ui::state::AppState,
};

use super::{
    error::ApiError,
    extract::ApiForm,
    session::{ensure_session, session_from_jar},
};

/// Where leave and share-link joins send the browser
const HOME: &str = "/";

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Join (or create) a room and bind it to the caller's session
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiForm(form): ApiForm<JoinRoomForm>,
) -> Result<(CookieJar, Json<JoinRoomResponse>), ApiError> {
    let (jar, session) = ensure_session(jar, state.session_ttl);
    let code = state.join_room_usecase.execute(session, &form.room).await?;

    Ok((
        jar,
        Json(JoinRoomResponse {
            success: true,
            room: code.into_string(),
        }),
    ))
}

/// Share link: join the room in the path, then go home
pub async fn join_room_via_link(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(room): Path<String>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (jar, session) = ensure_session(jar, state.session_ttl);
    state.join_room_usecase.execute(session, &room).await?;

    Ok((jar, Redirect::to(HOME)))
}

/// Room currently bound to the caller's session
pub async fn current_room(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Json<CurrentRoomResponse> {
    let session = session_from_jar(&jar);
    let room = state
        .authorize_room_usecase
        .current_room(session.as_ref())
        .await;

    Json(CurrentRoomResponse {
        room: room.map(|code| code.into_string()),
    })
}

/// Clear the session binding
pub async fn leave_room(State(state): State<Arc<AppState>>, jar: CookieJar) -> Redirect {
    let session = session_from_jar(&jar);
    state.leave_room_usecase.execute(session.as_ref()).await;

    Redirect::to(HOME)
}
