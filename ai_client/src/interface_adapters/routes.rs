use axum::routing::get;
use axum::Router;

use crate::interface_adapters::handlers::{start_get, start_post};
use crate::interface_adapters::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/start", get(start_get).post(start_post))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeuristicPolicy;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn build_test_app() -> Router {
        app(AppState {
            ws_url: Arc::from("ws://127.0.0.1:1"),
            error_sleep: Duration::from_millis(10),
            policy: Arc::new(HeuristicPolicy),
        })
    }

    fn cookie_from(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("expected a set-cookie header")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .split_once('=')
            .unwrap()
            .1
            .to_string()
    }

    #[tokio::test]
    async fn get_start_issues_an_xsrf_cookie() {
        let app = build_test_app();
        let request = Request::builder()
            .method("GET")
            .uri("/start")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }

    #[tokio::test]
    async fn post_start_without_xsrf_token_is_rejected() {
        let app = build_test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/start")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"player_key":"abc","ai_secret":"shh"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_start_with_mismatched_xsrf_token_is_rejected() {
        let app = build_test_app();
        let get_request = Request::builder()
            .method("GET")
            .uri("/start")
            .body(Body::empty())
            .unwrap();
        let get_response = app.clone().oneshot(get_request).await.unwrap();
        let token = cookie_from(&get_response);

        let request = Request::builder()
            .method("POST")
            .uri("/start")
            .header("content-type", "application/json")
            .header(header::COOKIE, format!("xsrf_token={token}"))
            .header("x-xsrf-token", "some-other-token")
            .body(Body::from(
                r#"{"player_key":"abc","ai_secret":"shh"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_start_with_matching_xsrf_token_and_empty_secret_is_rejected() {
        let app = build_test_app();
        let get_request = Request::builder()
            .method("GET")
            .uri("/start")
            .body(Body::empty())
            .unwrap();
        let get_response = app.clone().oneshot(get_request).await.unwrap();
        let token = cookie_from(&get_response);

        let request = Request::builder()
            .method("POST")
            .uri("/start")
            .header("content-type", "application/json")
            .header(header::COOKIE, format!("xsrf_token={token}"))
            .header("x-xsrf-token", &token)
            .body(Body::from(r#"{"player_key":"abc","ai_secret":""}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["message"], "ai_secret is required");
    }

    #[tokio::test]
    async fn post_start_with_valid_xsrf_spawns_a_bridge_task() {
        let app = build_test_app();
        let get_request = Request::builder()
            .method("GET")
            .uri("/start")
            .body(Body::empty())
            .unwrap();
        let get_response = app.clone().oneshot(get_request).await.unwrap();
        let token = cookie_from(&get_response);

        let request = Request::builder()
            .method("POST")
            .uri("/start")
            .header("content-type", "application/json")
            .header(header::COOKIE, format!("xsrf_token={token}"))
            .header("x-xsrf-token", &token)
            .body(Body::from(
                r#"{"player_key":"abc","ai_secret":"shh"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["started"], true);
    }
}
