// Thin reqwest client that triggers the AI bridge's admin HTTP surface.
// Grounded on `AuthClient`'s reqwest-wrapper shape, generalized to the
// GET-then-POST XSRF double-submit dance the AI admin surface requires.

use std::time::Duration;

use serde::Serialize;

const XSRF_COOKIE_NAME: &str = "xsrf_token";
const XSRF_HEADER_NAME: &str = "x-xsrf-token";

#[derive(Debug)]
pub enum AiAdminError {
    Transport(reqwest::Error),
    Upstream(reqwest::StatusCode),
    MissingXsrfCookie,
}

impl std::fmt::Display for AiAdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiAdminError::Transport(e) => write!(f, "ai admin transport error: {e}"),
            AiAdminError::Upstream(code) => write!(f, "ai admin returned {code}"),
            AiAdminError::MissingXsrfCookie => write!(f, "ai admin did not set an xsrf cookie"),
        }
    }
}

impl std::error::Error for AiAdminError {}

#[derive(Serialize)]
struct StartBody<'a> {
    player_key: &'a str,
    ai_secret: &'a str,
}

#[derive(Clone)]
pub struct AiAdminClient {
    http: reqwest::Client,
    base_url: String,
}

impl AiAdminClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch an XSRF token from `GET /start`, then `POST /start` with the
    /// matching cookie + header to spawn an AI bridge for `player_key`.
    pub async fn trigger(&self, player_key: &str, ai_secret: &str) -> Result<(), AiAdminError> {
        let get_resp = self
            .http
            .get(format!("{}/start", self.base_url))
            .send()
            .await
            .map_err(AiAdminError::Transport)?;

        let token = get_resp
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
            .find_map(|v| v.to_str().ok())
            .and_then(|raw| extract_cookie_value(raw, XSRF_COOKIE_NAME))
            .ok_or(AiAdminError::MissingXsrfCookie)?;

        let post_resp = self
            .http
            .post(format!("{}/start", self.base_url))
            .header(reqwest::header::COOKIE, format!("{XSRF_COOKIE_NAME}={token}"))
            .header(XSRF_HEADER_NAME, &token)
            .json(&StartBody {
                player_key,
                ai_secret,
            })
            .send()
            .await
            .map_err(AiAdminError::Transport)?;

        if post_resp.status().is_success() {
            Ok(())
        } else {
            Err(AiAdminError::Upstream(post_resp.status()))
        }
    }
}

fn extract_cookie_value(set_cookie_header: &str, name: &str) -> Option<String> {
    let first = set_cookie_header.split(';').next()?;
    let (key, value) = first.split_once('=')?;
    (key.trim() == name).then(|| value.trim().to_string())
}
