mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{serve, FakeBackend};
use filmdash::{ApiClient, ApiClientConfig};

async fn client_for(backend: &FakeBackend) -> ApiClient {
    let base_url = serve(backend.router()).await;
    ApiClient::new(ApiClientConfig::with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn write_methods_send_query_and_json_body() {
    let backend = FakeBackend::new(vec![
        ("/api/v1/watchlist", StatusCode::OK, json!({ "success": true })),
        ("/api/v1/watchlist/27205", StatusCode::OK, json!({ "success": true })),
    ]);
    let client = client_for(&backend).await;

    let entry = json!({ "movie_id": 27205, "note": "rewatch" });
    client
        .post("/api/v1/watchlist", &[("list", String::from("weekend"))], Some(&entry))
        .await
        .unwrap();
    let update = json!({ "note": "watched" });
    client
        .put("/api/v1/watchlist/27205", &[("notify", String::from("false"))], Some(&update))
        .await
        .unwrap();
    let removed = client
        .delete("/api/v1/watchlist/27205", &[("soft", String::from("true"))])
        .await
        .unwrap();
    assert_eq!(removed, json!({ "success": true }));

    let seen = backend.requests();
    assert_eq!(seen.len(), 3);

    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path, "/api/v1/watchlist");
    assert_eq!(seen[0].query["list"], "weekend");
    assert_eq!(seen[0].body, Some(entry));

    assert_eq!(seen[1].method, Method::PUT);
    assert_eq!(seen[1].query["notify"], "false");
    assert_eq!(seen[1].body, Some(update));

    assert_eq!(seen[2].method, Method::DELETE);
    assert_eq!(seen[2].path, "/api/v1/watchlist/27205");
    assert_eq!(seen[2].query["soft"], "true");
    assert_eq!(seen[2].body, None);
}

#[tokio::test]
async fn post_responses_on_movie_paths_are_normalized() {
    let backend = FakeBackend::ok(
        "/api/v1/movies",
        json!({ "data": { "id": 27205, "imdb_id": "1375666", "genres": "Action, Thriller" } }),
    );
    let client = client_for(&backend).await;

    let created = client
        .post("/api/v1/movies", &[], Some(&json!({ "title": "Inception" })))
        .await
        .unwrap();

    assert_eq!(created["data"]["imdb_id"], "tt1375666");
    assert_eq!(created["data"]["genres"], json!(["Action", "Thriller"]));
    let seen = backend.requests();
    assert_eq!(seen[0].method, Method::POST);
    assert!(seen[0].query.is_empty());
    assert_eq!(seen[0].body, Some(json!({ "title": "Inception" })));
}
