mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{DownCatalog, StubCatalog};
use playlist_ratings::{
    auth::generate_session_token, build_router, catalog::Catalog, db::MemoryStore,
    state::AppState,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

const SECRET: &str = "test-secret";

fn setup_app(catalog: Arc<dyn Catalog>) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), catalog, "playlist", SECRET);
    build_router(state)
}

fn token_for(id: &str, name: &str) -> String {
    generate_session_token(id, name, "access-token", SECRET).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Ratings
// =============================================================================

#[tokio::test]
async fn test_submit_and_read_ratings() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["t1"])));
    let alice = token_for("alice", "Alice Smith");
    let bob = token_for("bob", "Bob Jones");

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/ratings",
            Some(&alice),
            json!({"trackId": "t1", "rating": 8}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["average"], 8.0);
    assert_eq!(body["count"], 1);

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/ratings",
            Some(&bob),
            json!({"trackId": "t1", "rating": 5}),
        ))
        .await
        .unwrap();
    let body = extract_json(res.into_body()).await;
    assert_eq!(body["average"], 6.5);
    assert_eq!(body["count"], 2);

    let res = app
        .oneshot(get("/api/ratings?trackId=t1", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    assert_eq!(body["average"], 6.5);
    assert_eq!(body["count"], 2);
    assert_eq!(body["users"]["alice"]["rating"], 8);
    assert_eq!(body["users"]["alice"]["displayName"], "Alice Smith");
    assert_eq!(body["users"]["bob"]["rating"], 5);
}

#[tokio::test]
async fn test_unrated_track_reports_no_data() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&[])));

    let res = app
        .oneshot(get("/api/ratings?trackId=nothing", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    assert!(body["average"].is_null());
    assert_eq!(body["count"], 0);
    assert_eq!(body["users"], json!({}));
}

#[tokio::test]
async fn test_ratings_lookup_requires_track_id() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&[])));

    let res = app.oneshot(get("/api/ratings", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_rejects_bad_input() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["t1"])));
    let alice = token_for("alice", "Alice");

    for body in [
        json!({"trackId": "t1", "rating": 0}),
        json!({"trackId": "t1", "rating": 11}),
        json!({"trackId": "t1", "rating": "7"}),
        json!({"trackId": "t1"}),
        json!({"rating": 7}),
        json!({"trackId": 123, "rating": 7}),
        json!({"trackId": ["t1"], "rating": 7}),
    ] {
        let res = app
            .clone()
            .oneshot(send_json("POST", "/api/ratings", Some(&alice), body.clone()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_submit_requires_session() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["t1"])));

    let res = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/ratings",
            None,
            json!({"trackId": "t1", "rating": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .oneshot(send_json(
            "POST",
            "/api/ratings",
            Some("not-a-jwt"),
            json!({"trackId": "t1", "rating": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Playlist and added-by overrides
// =============================================================================

#[tokio::test]
async fn test_playlist_applies_added_by_overrides() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["t1", "t2"])));
    let alice = token_for("alice", "Alice");

    let res = app
        .clone()
        .oneshot(send_json(
            "PUT",
            "/api/track-meta",
            Some(&alice),
            json!({"t2": "Marie"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(get("/api/playlist", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0]["track"]["id"], "t1");
    assert_eq!(tracks[0]["added_by"]["id"], "spotify_adder");
    assert_eq!(tracks[1]["added_by"]["id"], "Marie");
    assert_eq!(tracks[1]["added_at"], "2024-03-01T12:00:00Z");

    let res = app.oneshot(get("/api/track-meta", None)).await.unwrap();
    let body = extract_json(res.into_body()).await;
    assert_eq!(body, json!({"t2": "Marie"}));
}

#[tokio::test]
async fn test_playlist_search_filters_by_name_and_artist() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["t1", "t2"])));
    let alice = token_for("alice", "Alice");

    let res = app
        .clone()
        .oneshot(get("/api/playlist?q=song%20T2", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0]["track"]["id"], "t2");

    let res = app
        .oneshot(get("/api/playlist?q=ARTIST", Some(&alice)))
        .await
        .unwrap();
    let body = extract_json(res.into_body()).await;
    assert_eq!(body["tracks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_playlist_requires_session() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["t1"])));

    let res = app.oneshot(get("/api/playlist", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_failure_is_service_unavailable() {
    let app = setup_app(Arc::new(DownCatalog));
    let alice = token_for("alice", "Alice");

    let res = app
        .clone()
        .oneshot(get("/api/playlist", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let res = app
        .oneshot(get("/api/stats", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Statistics and leaderboard
// =============================================================================

#[tokio::test]
async fn test_stats_and_leaderboard() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&["A", "B", "C"])));
    let alice = token_for("alice", "Alice Smith");
    let bob = token_for("bob", "Bob Jones");

    for (token, track, rating) in [
        (&alice, "A", 8),
        (&alice, "B", 6),
        (&bob, "A", 6),
        (&bob, "B", 6),
        (&bob, "C", 9),
    ] {
        let res = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/ratings",
                Some(token),
                json!({"trackId": track, "rating": rating}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app
        .clone()
        .oneshot(get("/api/stats", Some(&alice)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;

    let personal = &body["personal"];
    assert_eq!(personal["average"], 7.0);
    assert_eq!(personal["rated"], 2);
    assert_eq!(personal["total"], 3);
    assert_eq!(personal["highest"]["track"]["id"], "A");
    assert_eq!(personal["lowest"]["track"]["id"], "B");

    let group = &body["group"];
    assert_eq!(group["totalRaters"], 2);
    assert_eq!(group["mostControversial"]["track"]["id"], "A");
    assert_eq!(group["mostControversial"]["spread"], 2);
    assert_eq!(group["mostAgreed"]["track"]["id"], "B");
    assert_eq!(group["hiddenGems"][0]["track"]["id"], "C");
    assert_eq!(group["mostRated"]["track"]["id"], "A");
    assert_eq!(group["raters"][0]["raterId"], "bob");
    assert_eq!(group["raters"][0]["count"], 3);
    assert_eq!(group["raters"][1]["firstName"], "Alice");

    let res = app
        .oneshot(get("/api/leaderboard", Some(&bob)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    let ranks: Vec<(String, u64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["track"]["id"].as_str().unwrap().to_string(),
                e["rank"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        ranks,
        vec![
            ("C".to_string(), 1),
            ("A".to_string(), 2),
            ("B".to_string(), 3)
        ]
    );
    assert_eq!(body[0]["duration"], "3:20");
}

// =============================================================================
// Session handshake
// =============================================================================

#[tokio::test]
async fn test_callback_issues_usable_session() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&[])));

    let res = app
        .clone()
        .oneshot(get("/auth/callback?code=good", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    assert_eq!(body["spotifyId"], "alice");
    let token = body["token"].as_str().unwrap().to_string();

    let res = app
        .oneshot(get("/api/session", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = extract_json(res.into_body()).await;
    assert_eq!(body["spotifyId"], "alice");
    assert_eq!(body["name"], "Alice Example");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_callback_rejects_bad_code() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&[])));

    let res = app
        .clone()
        .oneshot(get("/auth/callback?code=bad", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .clone()
        .oneshot(get("/auth/callback?error=access_denied", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.oneshot(get("/auth/callback", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_redirects_to_authorize_url() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&[])));

    let res = app.oneshot(get("/auth/login", None)).await.unwrap();
    assert!(res.status().is_redirection());
    assert_eq!(
        res.headers()[header::LOCATION],
        "https://accounts.example/authorize?client_id=test"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app(Arc::new(StubCatalog::with_tracks(&[])));

    let res = app.oneshot(get("/nope", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"404 Not Found");
}
