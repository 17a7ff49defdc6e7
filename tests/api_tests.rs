use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use drakor::api::AppState;
use drakor::config::Config;
use drakor::entities::dramas;
use http_body_util::BodyExt;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// Default API key seeded by migration (must match m20260303_seed_admin.rs)
const DEFAULT_API_KEY: &str = "drakor_default_api_key_please_regenerate";

async fn spawn_app() -> (Arc<AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("drakor-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.general.max_db_connections = 1;
    config.observability.metrics_enabled = false;

    let state = drakor::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = drakor::api::router(state.clone()).await;
    (state, router)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    api_key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-Api-Key", key);
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn create_genre(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/genres",
        Some(DEFAULT_API_KEY),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

async fn create_drama(app: &Router, title: &str, status: &str, genre_ids: &[i64]) -> i64 {
    let (code, body) = send(
        app,
        "POST",
        "/api/dramas",
        Some(DEFAULT_API_KEY),
        Some(json!({
            "title": title,
            "synopsis": "A story",
            "year": 2016,
            "status": status,
            "genre_ids": genre_ids,
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

/// Registers an account and returns its API token.
async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn set_rating(state: &AppState, id: i64, rating: f64) {
    dramas::Entity::update_many()
        .col_expr(dramas::Column::Rating, Expr::value(rating))
        .filter(dramas::Column::Id.eq(i32::try_from(id).unwrap()))
        .exec(&state.store().conn)
        .await
        .unwrap();
}

fn slugs(drama: &Value) -> Vec<String> {
    drama["genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["slug"].as_str().unwrap().to_string())
        .collect()
}

fn titles(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_auth_required() {
    let (_, app) = spawn_app().await;

    let (status, _) = send(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/auth/me", Some("wrong-key"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");

    let request = Request::builder()
        .uri("/api/auth/me")
        .header("Authorization", format!("Bearer {DEFAULT_API_KEY}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_admin_cannot_write_catalog() {
    let (_, app) = spawn_app().await;
    let token = register(&app, "Regular Viewer", "viewer@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/genres",
        Some(&token),
        Some(json!({ "name": "Romance" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/analytics/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email_and_short_password() {
    let (_, app) = spawn_app().await;
    register(&app, "First User", "dup@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Second User", "email": "DUP@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "name": "Third User", "email": "third@example.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "dup@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "dup@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_create_then_replace_genres() {
    let (_, app) = spawn_app().await;
    let fantasy = create_genre(&app, "Fantasy").await;
    let romance = create_genre(&app, "Romance").await;

    let id = create_drama(&app, "Goblin", "completed", &[fantasy]).await;

    let (status, body) = send(&app, "GET", &format!("/api/dramas/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body["data"]), vec!["fantasy"]);
    assert_eq!(body["data"]["actors"], json!([]));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/dramas/{id}"),
        Some(DEFAULT_API_KEY),
        Some(json!({
            "title": "Goblin",
            "year": 2016,
            "status": "completed",
            "genre_ids": [fantasy, romance],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(slugs(&body["data"]), vec!["fantasy", "romance"]);

    let (_, body) = send(&app, "GET", &format!("/api/dramas/{id}"), None, None).await;
    assert_eq!(slugs(&body["data"]), vec!["fantasy", "romance"]);

    let (_, body) = send(&app, "GET", "/api/dramas?genre=romance", None, None).await;
    assert_eq!(body["data"]["total"], 1);
    let (_, body) = send(&app, "GET", &format!("/api/dramas?genre={fantasy}"), None, None).await;
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_cast_is_replaced_with_roles() {
    let (_, app) = spawn_app().await;
    let fantasy = create_genre(&app, "Fantasy").await;

    let mut actor_ids = Vec::new();
    for name in ["Gong Yoo", "Kim Go-eun"] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/actors",
            Some(DEFAULT_API_KEY),
            Some(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        actor_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (status, body) = send(
        &app,
        "POST",
        "/api/dramas",
        Some(DEFAULT_API_KEY),
        Some(json!({
            "title": "Goblin",
            "year": 2016,
            "status": "completed",
            "genre_ids": [fantasy],
            "actors": [
                { "actor_id": actor_ids[0], "role": "main" },
                { "actor_id": actor_ids[1], "role": "support" },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["actors"].as_array().unwrap().len(), 2);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/dramas/{id}"),
        Some(DEFAULT_API_KEY),
        Some(json!({
            "title": "Goblin",
            "year": 2016,
            "status": "completed",
            "genre_ids": [fantasy],
            "actors": [{ "actor_id": actor_ids[1], "role": "main" }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let actors = body["data"]["actors"].as_array().unwrap();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0]["name"], "Kim Go-eun");
    assert_eq!(actors[0]["role"], "main");
}

#[tokio::test]
async fn test_missing_genre_rolls_back_create_and_update() {
    let (_, app) = spawn_app().await;
    let fantasy = create_genre(&app, "Fantasy").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/dramas",
        Some(DEFAULT_API_KEY),
        Some(json!({
            "title": "Ghost Drama",
            "year": 2020,
            "status": "ongoing",
            "genre_ids": [fantasy, 9999],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Genre 9999 does not exist");

    let (_, body) = send(&app, "GET", "/api/dramas", None, None).await;
    assert_eq!(body["data"]["total"], 0);

    let id = create_drama(&app, "Goblin", "completed", &[fantasy]).await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/dramas/{id}"),
        Some(DEFAULT_API_KEY),
        Some(json!({
            "title": "Renamed",
            "year": 2016,
            "status": "completed",
            "genre_ids": [9999],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, "GET", &format!("/api/dramas/{id}"), None, None).await;
    assert_eq!(body["data"]["title"], "Goblin");
    assert_eq!(slugs(&body["data"]), vec!["fantasy"]);
}

#[tokio::test]
async fn test_drama_validation_and_not_found() {
    let (_, app) = spawn_app().await;
    let fantasy = create_genre(&app, "Fantasy").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/dramas",
        Some(DEFAULT_API_KEY),
        Some(json!({ "title": "No Genres", "year": 2020, "status": "ongoing", "genre_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/dramas",
        Some(DEFAULT_API_KEY),
        Some(json!({ "title": "Bad Status", "year": 2020, "status": "paused", "genre_ids": [fantasy] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/dramas/4242", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/dramas/4242",
        Some(DEFAULT_API_KEY),
        Some(json!({ "title": "Nothing", "year": 2020, "status": "ongoing", "genre_ids": [fantasy] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/dramas/4242", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/dramas?status=paused", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_filtered_rating_pages_share_total() {
    let (state, app) = spawn_app().await;
    let genre = create_genre(&app, "Romance").await;

    for (title, status, rating) in [
        ("Goblin", "ongoing", 9.5),
        ("Vincenzo", "ongoing", 7.0),
        ("Queen of Tears", "ongoing", 8.8),
        ("Crash Landing on You", "completed", 9.9),
    ] {
        let id = create_drama(&app, title, status, &[genre]).await;
        set_rating(&state, id, rating).await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/dramas?status=ongoing&sort=rating&limit=2&page=1",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ratings: Vec<f64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["rating"].as_f64().unwrap())
        .collect();
    assert_eq!(ratings, vec![9.5, 8.8]);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["total_pages"], 2);

    let (_, body) = send(
        &app,
        "GET",
        "/api/dramas?status=ongoing&sort=rating&limit=2&page=2",
        None,
        None,
    )
    .await;
    assert_eq!(titles(&body["data"]), vec!["Vincenzo"]);
    assert_eq!(body["data"]["items"][0]["rating"], 7.0);
    assert_eq!(body["data"]["total"], 3);

    let (_, body) = send(&app, "GET", "/api/dramas?q=QUEEN", None, None).await;
    assert_eq!(titles(&body["data"]), vec!["Queen of Tears"]);
    assert_eq!(body["data"]["total"], 1);

    let (_, body) = send(&app, "GET", "/api/dramas?sort=bogus&page=abc&limit=x", None, None).await;
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["limit"], 10);
    assert_eq!(body["data"]["total"], 4);
}

#[tokio::test]
async fn test_genre_slug_rules() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/genres",
        Some(DEFAULT_API_KEY),
        Some(json!({ "name": "Slice of Life" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "slice-of-life");

    let (status, _) = send(
        &app,
        "POST",
        "/api/genres",
        Some(DEFAULT_API_KEY),
        Some(json!({ "name": "Slice Of Life!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/genres",
        Some(DEFAULT_API_KEY),
        Some(json!({ "name": "Mystery", "slug": "!!!" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/genres", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reviews_drive_drama_rating() {
    let (_, app) = spawn_app().await;
    let genre = create_genre(&app, "Romance").await;
    let drama = create_drama(&app, "Goblin", "completed", &[genre]).await;

    let alice = register(&app, "Alice Kim", "alice@example.com").await;
    let bob = register(&app, "Bob Park", "bob@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&alice),
        Some(json!({ "drama_id": drama, "rating": 9, "review_text": "Beautiful" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["author"]["name"], "Alice Kim");
    let alice_review = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&bob),
        Some(json!({ "drama_id": drama, "rating": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", &format!("/api/dramas/{drama}"), None, None).await;
    assert_eq!(body["data"]["rating"], 8.5);

    let (status, _) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&alice),
        Some(json!({ "drama_id": drama, "rating": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/reviews/{alice_review}"),
        Some(&bob),
        Some(json!({ "rating": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&bob),
        Some(json!({ "drama_id": drama, "rating": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/reviews/{alice_review}"),
        Some(DEFAULT_API_KEY),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/dramas/{drama}"), None, None).await;
    assert_eq!(body["data"]["rating"], 8.0);

    let (status, body) = send(&app, "GET", &format!("/api/dramas/{drama}/reviews"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_watchlist_flow_is_idempotent() {
    let (_, app) = spawn_app().await;
    let genre = create_genre(&app, "Comedy").await;
    let drama = create_drama(&app, "Queen of Tears", "ongoing", &[genre]).await;
    let token = register(&app, "Watcher One", "watcher@example.com").await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/watchlist",
            Some(&token),
            Some(json!({ "drama_id": drama })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, "GET", &format!("/api/watchlist/{drama}/check"), Some(&token), None).await;
    assert_eq!(body["data"]["is_watchlisted"], true);

    let (_, body) = send(&app, "GET", "/api/watchlist", Some(&token), None).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["drama"]["title"], "Queen of Tears");

    let (status, _) = send(&app, "DELETE", &format!("/api/watchlist/{drama}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/watchlist/{drama}/check"), Some(&token), None).await;
    assert_eq!(body["data"]["is_watchlisted"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/api/watchlist",
        Some(&token),
        Some(json!({ "drama_id": 4242 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_counts_first_view_only() {
    let (_, app) = spawn_app().await;
    let genre = create_genre(&app, "Fantasy").await;
    let drama = create_drama(&app, "Goblin", "completed", &[genre]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/seasons",
        Some(DEFAULT_API_KEY),
        Some(json!({ "drama_id": drama, "season_number": 1, "title": "Season 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let season = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/episodes",
        Some(DEFAULT_API_KEY),
        Some(json!({
            "season_id": season,
            "episode_number": 1,
            "title": "Episode 1",
            "video_url": "https://example.com/goblin/1.mp4",
            "duration": 3600,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let episode = body["data"]["id"].as_i64().unwrap();

    let token = register(&app, "Binge Watcher", "binge@example.com").await;
    for progress in [120, 900] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/history",
            Some(&token),
            Some(json!({ "episode_id": episode, "progress_seconds": progress })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["progress_seconds"], progress);
    }

    let (_, body) = send(&app, "GET", &format!("/api/episodes/{episode}"), None, None).await;
    assert_eq!(body["data"]["view_count"], 1);

    let (_, body) = send(&app, "GET", &format!("/api/dramas/{drama}"), None, None).await;
    assert_eq!(body["data"]["view_count"], 1);

    let (_, body) = send(&app, "GET", &format!("/api/history/{episode}"), Some(&token), None).await;
    assert_eq!(body["data"]["progress_seconds"], 900);

    let (_, body) = send(&app, "GET", "/api/history", Some(&token), None).await;
    assert_eq!(body["data"]["total"], 1);

    let (_, body) = send(&app, "GET", "/api/analytics/dashboard", Some(DEFAULT_API_KEY), None).await;
    assert_eq!(body["data"]["total_dramas"], 1);
    assert_eq!(body["data"]["total_episodes"], 1);
    assert_eq!(body["data"]["total_users"], 2);
    assert_eq!(body["data"]["total_views"], 1);
}

#[tokio::test]
async fn test_health_and_ping() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    let (status, body) = send(&app, "GET", "/api/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "pong");
}

#[tokio::test]
async fn test_huge_page_numbers_return_empty_pages() {
    let (_, app) = spawn_app().await;
    let genre = create_genre(&app, "Romance").await;
    let drama = create_drama(&app, "Goblin", "completed", &[genre]).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/dramas?page=9223372036854775807&limit=10",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["total"], 1);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/dramas/{drama}/reviews?page=9223372036854775807"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["items"], json!([]));

    let (status, body) = send(&app, "GET", "/api/actors?page=9223372036854775807&limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn test_malformed_path_id_uses_error_envelope() {
    let (_, app) = spawn_app().await;

    for uri in ["/api/dramas/99999999999", "/api/dramas/abc", "/api/episodes/1.5/comments"] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}
