mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{api_for, FakeBackend};
use filmdash::api::visualization::{
    ActorNetworkParams, BudgetRevenueParams, GenreComparisonParams, RankingParams,
    RuntimeParams, YearlyTrendParams,
};

#[tokio::test]
async fn budget_revenue_sends_defaults() {
    let backend = FakeBackend::ok(
        "/api/v1/visualization/budget-revenue",
        json!({ "data": [{
            "budget_bucket": "0",
            "budget_bucket_end": "10000000",
            "avg_revenue": "12000000.50",
            "avg_roi": "3.20",
            "movie_count": 812
        }] }),
    );
    let api = api_for(&backend).await;

    let params = BudgetRevenueParams::default();
    let buckets = api.visualization.budget_revenue(&params).await.unwrap().data;
    assert_eq!(buckets[0].movie_count, 812);
    assert_eq!(buckets[0].avg_roi, "3.20");

    let query = &backend.requests()[0].query;
    assert_eq!(query["startYear"], "1940");
    assert_eq!(query["endYear"], params.end_year.to_string());
    assert_eq!(query["minVotes"], "0");
    assert_eq!(query["bucketSize"], "10000000");
}

#[tokio::test]
async fn distributions_and_trends() {
    let backend = FakeBackend::new(vec![
        (
            "/api/v1/visualization/runtime-distribution",
            StatusCode::OK,
            json!({ "data": [{ "bucket_start": 90, "bucket_end": 105, "movie_count": 1400 }] }),
        ),
        (
            "/api/v1/visualization/rating-distribution",
            StatusCode::OK,
            json!({
                "data": [{ "bucket_start": "6.5", "bucket_end": "7.0", "movie_count": "600" }]
            }),
        ),
        (
            "/api/v1/visualization/yearly-trends",
            StatusCode::OK,
            json!({ "data": [{ "year": 2012, "movie_count": 200, "avg_rating": "6.2" }] }),
        ),
    ]);
    let api = api_for(&backend).await;

    let runtime = api
        .visualization
        .runtime_distribution(&RuntimeParams::default())
        .await
        .unwrap();
    assert_eq!(runtime.data[0].bucket_start, "90");

    let ratings = api.visualization.rating_distribution(0.5).await.unwrap();
    assert_eq!(ratings.data[0].movie_count, 600);

    let trends = api
        .visualization
        .yearly_trends(&YearlyTrendParams::default())
        .await
        .unwrap();
    assert_eq!(trends.data[0].avg_rating, Some(6.2));

    let requests = backend.requests();
    assert_eq!(requests[0].query["bucketSize"], "15");
    assert_eq!(requests[0].query["minVotes"], "15");
    assert_eq!(requests[1].query["bucketSize"], "0.5");
    assert_eq!(requests[2].query["startYear"], "1990");
    assert_eq!(requests[2].query["minVotes"], "10");
}

#[tokio::test]
async fn actor_network_graph() {
    let backend = FakeBackend::ok(
        "/api/v1/visualization/actor-collaborations",
        json!({ "data": {
            "nodes": [
                { "id": "1", "name": "Tom Hanks", "value": 8, "symbolSize": 50, "category": 0 },
                { "id": "2", "name": "Tim Allen", "value": 3, "symbolSize": 20, "category": 1 }
            ],
            "links": [{ "source": "1", "target": "2", "value": 3 }],
            "categories": [{ "name": "Center" }, { "name": "Collaborator" }]
        }}),
    );
    let api = api_for(&backend).await;

    let network = api
        .visualization
        .actor_network(&ActorNetworkParams::for_actor("Tom Hanks"))
        .await
        .unwrap()
        .data;
    assert_eq!(network.nodes.len(), 2);
    assert_eq!(network.collaborators("1")[0].0.name, "Tim Allen");

    let query = &backend.requests()[0].query;
    assert_eq!(query["actor"], "Tom Hanks");
    assert_eq!(query["minCollaborations"], "2");
    assert_eq!(query["limit"], "50");
}

#[tokio::test]
async fn rankings_use_their_order_keys() {
    let ranking = json!({
        "data": [{ "name": "Steven Spielberg", "movie_count": 27, "avg_rating": 6.9 }]
    });
    let backend = FakeBackend::new(vec![
        ("/api/v1/visualization/top-production-companies", StatusCode::OK, ranking.clone()),
        ("/api/v1/visualization/top-directors", StatusCode::OK, ranking.clone()),
        ("/api/v1/visualization/top-cinematographers", StatusCode::OK, ranking.clone()),
        ("/api/v1/visualization/top-composers", StatusCode::OK, ranking.clone()),
        ("/api/v1/visualization/cross-role-talents", StatusCode::OK, ranking.clone()),
        ("/api/v1/visualization/language-distribution", StatusCode::OK, ranking.clone()),
        ("/api/v1/visualization/genre-comparison", StatusCode::OK, ranking.clone()),
        ("/api/v1/genres/stats", StatusCode::OK, ranking),
    ]);
    let api = api_for(&backend).await;
    let viz = &api.visualization;

    viz.top_production_companies(&RankingParams::production_companies())
        .await
        .unwrap();
    let directors = viz.top_directors(&RankingParams::directors()).await.unwrap();
    assert_eq!(directors.data[0].name, "Steven Spielberg");
    viz.top_cinematographers(&RankingParams::crew()).await.unwrap();
    viz.top_composers(&RankingParams::crew()).await.unwrap();
    viz.cross_role_talents(&RankingParams::crew()).await.unwrap();
    viz.language_distribution(&RankingParams::languages())
        .await
        .unwrap();
    viz.genre_comparison(&GenreComparisonParams {
        genres: Some(String::from("Action,Comedy")),
        ..GenreComparisonParams::default()
    })
    .await
    .unwrap();
    let genres = viz.genres_with_stats().await.unwrap();
    assert_eq!(genres.data[0].avg_rating, Some(6.9));

    let requests = backend.requests();
    assert_eq!(requests.len(), 8);
    assert_eq!(requests[0].query["metric"], "movie_count");
    assert_eq!(requests[0].query["limit"], "10");
    assert_eq!(requests[0].query["minMovies"], "5");
    assert_eq!(requests[1].query["sortBy"], "movie_count");
    assert_eq!(requests[1].query["limit"], "20");
    assert_eq!(requests[2].query["limit"], "15");
    assert!(!requests[2].query.contains_key("sortBy"));
    assert_eq!(requests[5].query["minMovies"], "5");
    assert_eq!(requests[5].query["limit"], "20");
    assert_eq!(requests[6].query["genres"], "Action,Comedy");
    assert_eq!(requests[6].query["metric"], "avg_rating");
    assert!(requests[7].query.is_empty());
}
