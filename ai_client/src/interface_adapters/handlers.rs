// Admin HTTP surface: `GET /start` hands out an XSRF token, `POST /start`
// checks the double-submit cookie/header pair and spawns a bridge task for
// one player key. Grounded on `auth_server`'s handler shape (typed request,
// `(StatusCode, Json<ErrorResponse>)` error path) and on
// `examples/original_source/http_server.py`'s `AIServer` GET/POST contract,
// translated from tornado's built-in `xsrf_cookies` to a hand-rolled
// double-submit token since no cookie crate exists anywhere in the corpus.
// The cookie/header names must match `game_server`'s `AiAdminClient` exactly.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::interface_adapters::state::AppState;
use crate::use_cases::{BridgeConfig, bridge};

pub const XSRF_COOKIE_NAME: &str = "xsrf_token";
pub const XSRF_HEADER_NAME: &str = "x-xsrf-token";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

/// Hands out a fresh XSRF token as a cookie. Callers must echo it back on
/// `POST /start` in both the cookie and the `x-xsrf-token` header.
pub async fn start_get() -> Response {
    let token = Uuid::new_v4().to_string();
    let mut response = StatusCode::NO_CONTENT.into_response();
    let cookie = format!("{XSRF_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Strict");
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cookie.parse().expect("valid cookie header"));
    response
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub player_key: String,
    pub ai_secret: String,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub started: bool,
}

/// Spawns a bridge task for `player_key` once the double-submit token
/// matches and `ai_secret` is non-empty. The caller (`game_server`) is
/// trusted to have already authenticated `ai_secret` against the database
/// row it came from; this endpoint only guards against cross-site request
/// forgery, matching the original's `xsrf_cookies=True` scope.
pub async fn start_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<StartRequest>,
) -> Result<Json<StartResponse>, (StatusCode, Json<ErrorResponse>)> {
    let cookie_token = cookie_value(&headers, XSRF_COOKIE_NAME);
    let header_token = headers
        .get(XSRF_HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match (cookie_token, header_token) {
        (Some(cookie), Some(header)) if cookie == header && !cookie.is_empty() => {}
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "xsrf token missing or mismatched",
            ));
        }
    }

    if payload.ai_secret.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "ai_secret is required"));
    }
    if payload.player_key.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "player_key is required"));
    }

    let config = BridgeConfig {
        ws_url: state.ws_url.to_string(),
        error_sleep: state.error_sleep,
    };
    let policy = state.policy.clone();
    let player_key = payload.player_key.clone();

    tokio::spawn(async move {
        info!(key = %player_key, "starting ai bridge");
        if let Err(e) = bridge::run(config, player_key.clone(), policy).await {
            warn!(key = %player_key, error = %e, "ai bridge exited with an error");
        }
    });

    Ok(Json(StartResponse { started: true }))
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
