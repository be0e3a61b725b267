//! Session cookie handling and the authorized-room extractor.

use std::{sync::Arc, time::Duration};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    domain::{RoomHandle, SessionId},
    ui::state::AppState,
};

use super::error::ApiError;

/// Name of the cookie carrying the session identifier
pub const SESSION_COOKIE: &str = "roomdrop_session";

/// Session identifier carried by the request, if any
pub fn session_from_jar(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
}

/// Reuse the request's session or start a new one.
///
/// The cookie is (re)issued every time so its `Max-Age` follows the
/// server-side idle timeout of the binding.
pub fn ensure_session(jar: CookieJar, ttl: Duration) -> (CookieJar, SessionId) {
    let session = session_from_jar(&jar).unwrap_or_else(SessionId::generate);
    let max_age = time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
    let cookie = Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age);
    (jar.add(cookie), session)
}

/// The room bound to the caller's session.
///
/// Rejects with `401 Invalid room` before any handler touches storage.
pub struct AuthorizedRoom(pub RoomHandle);

impl FromRequestParts<Arc<AppState>> for AuthorizedRoom {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = session_from_jar(&jar);
        let room = state
            .authorize_room_usecase
            .execute(session.as_ref())
            .await?;
        Ok(Self(room))
    }
}
