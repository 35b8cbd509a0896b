#[cfg(test)]
mod replay_controller_tests {
    use crate::replay::{configure_routes, RenderSettings};
    use crate::replay::controller::search_replays_handler_impl;
    use crate::replay::repository::ReplayRepository;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use actix_web::web;
    use actix_web::App;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared::{Replay, ReplayDetail, SearchParams};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const ROOT: &str = "https://replays.example.com";

    // Records what the routes asked for and answers from memory
    #[derive(Clone, Default)]
    struct MockReplayRepository {
        replays: Arc<Mutex<Vec<Replay>>>,
        details: Arc<Mutex<Vec<ReplayDetail>>>,
        searches: Arc<Mutex<Vec<SearchParams>>>,
        lookups: Arc<Mutex<Vec<(String, Option<String>)>>>,
    }

    impl MockReplayRepository {
        async fn add_replay(&self, replay: Replay) {
            self.replays.lock().await.push(replay);
        }

        async fn add_detail(&self, detail: ReplayDetail) {
            self.details.lock().await.push(detail);
        }
    }

    #[async_trait::async_trait]
    impl ReplayRepository for MockReplayRepository {
        async fn search(&self, params: &SearchParams) -> Vec<Replay> {
            self.searches.lock().await.push(params.clone());
            self.replays.lock().await.clone()
        }

        async fn find_by_id(&self, id: &str, password: Option<&str>) -> Option<ReplayDetail> {
            self.lookups
                .lock()
                .await
                .push((id.to_string(), password.map(str::to_string)));
            self.details.lock().await.iter().find(|d| d.id == id).cloned()
        }
    }

    fn replay(id: &str) -> Replay {
        serde_json::from_value(json!({
            "id": id,
            "p1": "Red",
            "p2": "Blue",
            "format": "gen9ou",
            "uploadtime": 1700000000,
            "rating": 1500,
        }))
        .unwrap()
    }

    fn detail(id: &str) -> ReplayDetail {
        serde_json::from_value(json!({
            "id": id,
            "format": "[Gen 9] OU",
            "p1": "Red",
            "p2": "Blue",
            "log": "|player|p1|Red\n|win|Red",
            "uploadtime": 1700000000,
        }))
        .unwrap()
    }

    macro_rules! replay_app {
        ($repo:expr) => {
            replay_app!($repo, RenderSettings::new(ROOT))
        };
        ($repo:expr, $settings:expr) => {
            test::init_service(App::new().configure(|cfg| {
                configure_routes(cfg, $repo.clone(), $settings)
            }))
            .await
        };
    }

    #[tokio::test]
    async fn test_search_returns_store_results() {
        let repo = MockReplayRepository::default();
        repo.add_replay(replay("gen9ou-1")).await;
        repo.add_replay(replay("gen9ou-2")).await;
        let app = replay_app!(repo);

        let req = test::TestRequest::get()
            .uri("/replays/search.json?format=gen9ou&page=2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<Replay> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].id, "gen9ou-1");

        let searches = repo.searches.lock().await;
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].format.as_deref(), Some("gen9ou"));
        assert_eq!(searches[0].page, Some(2));
    }

    #[test_log::test(tokio::test)]
    async fn test_search_collapses_repeated_parameters() {
        let repo = MockReplayRepository::default();
        let app = replay_app!(repo);

        let req = test::TestRequest::get()
            .uri("/replays/search.json?format=gen9ou&format=gen8ou&username=&rating=yes")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let searches = repo.searches.lock().await;
        assert_eq!(
            searches[0],
            SearchParams {
                rating: Some(true),
                format: Some("gen9ou".to_string()),
                ..SearchParams::default()
            }
        );
    }

    #[tokio::test]
    async fn test_search_with_empty_store_is_empty_list() {
        let repo = MockReplayRepository::default();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(repo))
                .route(
                    "/search.json",
                    web::get().to(search_replays_handler_impl::<MockReplayRepository>),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/search.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Vec<Replay> = test::read_body_json(resp).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_replay_json() {
        let repo = MockReplayRepository::default();
        repo.add_detail(detail("gen9ou-77")).await;
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9ou-77.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: ReplayDetail = test::read_body_json(resp).await;
        assert_eq!(body.id, "gen9ou-77");
        assert_eq!(body.log, "|player|p1|Red\n|win|Red");
    }

    #[tokio::test]
    async fn test_replay_json_not_found() {
        let repo = MockReplayRepository::default();
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9ou-404.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "No replay found.");
    }

    #[tokio::test]
    async fn test_private_replay_passes_password() {
        let repo = MockReplayRepository::default();
        repo.add_detail(detail("gen9ou-77")).await;
        let app = replay_app!(repo);

        let req = test::TestRequest::get()
            .uri("/replays/gen9ou-77-s3cretpw.log")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let lookups = repo.lookups.lock().await;
        assert_eq!(
            lookups[0],
            ("gen9ou-77".to_string(), Some("s3cret".to_string()))
        );
    }

    #[tokio::test]
    async fn test_replay_log_is_plain_text() {
        let repo = MockReplayRepository::default();
        repo.add_detail(detail("gen9ou-77")).await;
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9ou-77.log").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        let body = test::read_body(resp).await;
        assert_eq!(body, "|player|p1|Red\n|win|Red");
    }

    #[tokio::test]
    async fn test_replay_log_not_found() {
        let repo = MockReplayRepository::default();
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9ou-1.log").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "No replay found.");
    }

    #[tokio::test]
    async fn test_replay_page_renders_html() {
        let repo = MockReplayRepository::default();
        repo.add_detail(detail("gen9ou-77")).await;
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9ou-77").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(r#"value="gen9ou-77""#));
        assert!(html.contains("https://replays.example.com/users/red"));
        assert!(html.contains("|win|Red"));
    }

    #[tokio::test]
    async fn test_replay_page_not_found() {
        let repo = MockReplayRepository::default();
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9ou-5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(resp).await, "No replay found.");
    }

    #[tokio::test]
    async fn test_replay_page_accepts_dotted_id() {
        let repo = MockReplayRepository::default();
        repo.add_detail(detail("gen9.ou-5")).await;
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/gen9.ou-5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(repo.lookups.lock().await[0], ("gen9.ou-5".to_string(), None));
    }

    #[tokio::test]
    async fn test_static_file_wins_over_replay_id() {
        let repo = MockReplayRepository::default();
        let settings = RenderSettings::new(ROOT).with_static_dir(env!("CARGO_MANIFEST_DIR"));
        let app = replay_app!(repo, settings);

        let req = test::TestRequest::get().uri("/replays/Cargo.toml").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("[package]"));
        assert!(repo.lookups.lock().await.is_empty());

        // Names with no file behind them are still replay ids
        let req = test::TestRequest::get().uri("/replays/gen9ou-5").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(repo.lookups.lock().await.len(), 1);
    }

    #[::core::prelude::v1::test]
    fn test_static_file_only_matches_top_level_names() {
        let settings = RenderSettings::new(ROOT).with_static_dir(env!("CARGO_MANIFEST_DIR"));
        assert!(settings.static_file("Cargo.toml").is_some());
        assert_eq!(settings.static_file("src"), None);
        assert_eq!(settings.static_file(".."), None);
        assert_eq!(settings.static_file("src/lib.rs"), None);
        assert_eq!(RenderSettings::new(ROOT).static_file("Cargo.toml"), None);
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_id_is_bad_request() {
        let repo = MockReplayRepository::default();
        let app = replay_app!(repo);

        let req = test::TestRequest::get().uri("/replays/.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "No replay id specified.");

        let req = test::TestRequest::get().uri("/replays/.log").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "No replay id specified.");

        assert!(repo.lookups.lock().await.is_empty());
    }
}
