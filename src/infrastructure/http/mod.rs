//! HTTP REST API routes

mod config_routes;
mod generation_routes;
mod i18n_routes;
mod view_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use config_routes::*;
pub use generation_routes::*;
pub use i18n_routes::*;
pub use view_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Generation routes
        .route(
            "/api/generate/miniature",
            post(generation_routes::generate_miniature),
        )
        .route("/api/generate/item", post(generation_routes::generate_item))
        .route(
            "/api/generate/scenario",
            post(generation_routes::generate_scenario),
        )
        .route("/api/generate/npc", post(generation_routes::generate_npc))
        // View routes
        .route("/api/views/{kind}", get(view_routes::get_view))
        .route(
            "/api/views/{kind}/images/{slot}",
            get(view_routes::download_image),
        )
        // String table routes
        .route("/api/i18n/{lang}", get(i18n_routes::get_strings))
        .route("/api/i18n/{lang}/rarities", get(i18n_routes::get_rarities))
        // Configuration routes
        .route("/api/config", get(config_routes::get_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::services::generation_service::tests::{npc_json, sun_blade, MockAi};
    use crate::infrastructure::config::AppConfig;

    fn app(ai: MockAi) -> Router {
        let state = AppState::with_port(AppConfig::default(), Arc::new(ai)).unwrap();
        create_routes().with_state(Arc::new(state))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn json_body(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_generate_item_then_download() {
        let app = app(MockAi::new(sun_blade()));

        let (status, body) = send(
            &app,
            post_json(
                "/api/generate/item",
                json!({"language": "en", "name": "Sun Blade", "is_magical": true, "rarity": "Rare"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["item"]["name"], "Sun Blade");
        assert_eq!(body["image"], "data:image/png;base64,SU1BR0U=");

        let response = app
            .clone()
            .oneshot(get("/api/views/item/images/image"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sun_blade.png\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"IMAGE");

        let (status, body) = send(&app, get("/api/views/item")).await;
        assert_eq!(status, StatusCode::OK);
        let view = json_body(&body);
        assert_eq!(view["phase"], "succeeded");
        assert_eq!(view["downloads"], json!(["image"]));
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request_in_default_language() {
        let app = app(MockAi::new(sun_blade()));
        let (status, body) = send(&app, post_json("/api/generate/npc", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let expected = crate::application::services::Translator::embedded()
            .unwrap()
            .text(crate::domain::value_objects::Language::Pt, "errorNpcFields");
        assert_eq!(json_body(&body), json!({ "error": expected }));
    }

    #[tokio::test]
    async fn test_missing_image_is_bad_gateway() {
        let mut ai = MockAi::new(json!({"name": "Ruins", "detailedDescription": "Old."}));
        ai.image = None;
        let app = app(ai);
        let (status, body) = send(
            &app,
            post_json("/api/generate/scenario", json!({"mode": "random", "language": "en"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json_body(&body)["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_npc_view_renders_stat_block() {
        let app = app(MockAi::new(npc_json("enemy")));
        let (status, _) = send(
            &app,
            post_json(
                "/api/generate/npc",
                json!({"language": "en", "npc_type": "enemy", "gender": "female"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/api/views/npc")).await;
        let view = json_body(&body);
        assert_eq!(view["stat_block"]["name"], "Mirela Vash");
        assert_eq!(view["downloads"], json!(["portrait", "miniature", "token"]));

        let response = app
            .clone()
            .oneshot(get("/api/views/npc/images/portrait"))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"mirela_vash_portrait.png\""
        );
    }

    #[tokio::test]
    async fn test_unknown_kind_and_empty_download_are_not_found() {
        let app = app(MockAi::new(Value::Null));
        let (status, _) = send(&app, get("/api/views/weapon")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get("/api/views/scenario/images/image?lang=en")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let expected = crate::application::services::Translator::embedded()
            .unwrap()
            .text(crate::domain::value_objects::Language::En, "errorNoResult");
        assert_eq!(json_body(&body)["error"], expected);
    }

    #[tokio::test]
    async fn test_strings_and_config() {
        let app = app(MockAi::new(Value::Null));

        let (status, body) = send(&app, get("/api/i18n/en/rarities")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body).as_array().unwrap().len(), 7);

        let (status, body) = send(&app, get("/api/i18n/pt")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json_body(&body)["statBlock"].is_object());

        let (status, _) = send(&app, get("/api/i18n/de")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get("/api/config")).await;
        assert_eq!(status, StatusCode::OK);
        let config = json_body(&body);
        assert_eq!(config["has_api_key"], false);
        assert_eq!(config["default_language"], "pt");
        assert_eq!(config["aspect_ratios"][1], "3:4");
        assert!(config.get("api_key").is_none());
    }
}
