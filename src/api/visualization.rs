use serde::de::DeserializeOwned;

use crate::api::{current_year, log_api_error, push_opt};
use crate::client::ApiClient;
use crate::config::API_PREFIX;
use crate::error::ApiError;
use crate::movie::ApiEnvelope;
use crate::visualization::{
    ActorNetwork, BudgetRevenueBucket, RankingEntry, RatingBucket, RuntimeBucket, YearlyTrend,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRevenueParams {
    pub start_year: u16,
    pub end_year: u16,
    pub min_votes: u32,
    pub bucket_size: u64,
}

impl Default for BudgetRevenueParams {
    fn default() -> Self {
        Self {
            start_year: 1940,
            end_year: current_year(),
            min_votes: 0,
            bucket_size: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeParams {
    pub bucket_size: u32,
    pub min_votes: u32,
}

impl Default for RuntimeParams {
    fn default() -> Self {
        Self {
            bucket_size: 15,
            min_votes: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorNetworkParams {
    pub actor: String,
    pub min_collaborations: u32,
    pub limit: u32,
}

impl ActorNetworkParams {
    pub fn for_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            min_collaborations: 2,
            limit: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyTrendParams {
    pub start_year: u16,
    pub end_year: u16,
    pub min_votes: u32,
}

impl Default for YearlyTrendParams {
    fn default() -> Self {
        Self {
            start_year: 1990,
            end_year: current_year(),
            min_votes: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreComparisonParams {
    /// Comma-separated genre names; all genres when absent.
    pub genres: Option<String>,
    pub metric: String,
}

impl Default for GenreComparisonParams {
    fn default() -> Self {
        Self {
            genres: None,
            metric: String::from("avg_rating"),
        }
    }
}

/// Shared shape of the ranking endpoints (companies, directors, crew).
#[derive(Debug, Clone, PartialEq)]
pub struct RankingParams {
    pub limit: u32,
    pub min_movies: u32,
    /// Ranking key; sent as `metric` or `sortBy` depending on the endpoint.
    pub order: Option<String>,
}

impl RankingParams {
    pub fn new(limit: u32, min_movies: u32) -> Self {
        Self {
            limit,
            min_movies,
            order: None,
        }
    }

    pub fn ordered_by(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn production_companies() -> Self {
        Self::new(10, 5).ordered_by("movie_count")
    }

    pub fn directors() -> Self {
        Self::new(20, 3).ordered_by("movie_count")
    }

    pub fn crew() -> Self {
        Self::new(15, 2)
    }

    pub fn languages() -> Self {
        Self::new(20, 5)
    }

    fn to_query(&self, order_key: &'static str) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.limit.to_string()),
            ("minMovies", self.min_movies.to_string()),
        ];
        push_opt(&mut query, order_key, self.order.as_ref());
        query
    }
}

#[derive(Clone)]
pub struct VisualizationApi {
    client: ApiClient,
}

impl VisualizationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiEnvelope<T>, ApiError> {
        self.client
            .get_json(path, query)
            .await
            .map_err(|e| log_api_error(operation, e))
    }

    fn path(endpoint: &str) -> String {
        format!("{}/visualization/{}", API_PREFIX, endpoint)
    }

    pub async fn budget_revenue(
        &self,
        params: &BudgetRevenueParams,
    ) -> Result<ApiEnvelope<Vec<BudgetRevenueBucket>>, ApiError> {
        let query = [
            ("startYear", params.start_year.to_string()),
            ("endYear", params.end_year.to_string()),
            ("minVotes", params.min_votes.to_string()),
            ("bucketSize", params.bucket_size.to_string()),
        ];
        self.fetch("budget_revenue", &Self::path("budget-revenue"), &query)
            .await
    }

    pub async fn runtime_distribution(
        &self,
        params: &RuntimeParams,
    ) -> Result<ApiEnvelope<Vec<RuntimeBucket>>, ApiError> {
        let query = [
            ("bucketSize", params.bucket_size.to_string()),
            ("minVotes", params.min_votes.to_string()),
        ];
        self.fetch(
            "runtime_distribution",
            &Self::path("runtime-distribution"),
            &query,
        )
        .await
    }

    pub async fn actor_network(
        &self,
        params: &ActorNetworkParams,
    ) -> Result<ApiEnvelope<ActorNetwork>, ApiError> {
        let query = [
            ("actor", params.actor.clone()),
            ("minCollaborations", params.min_collaborations.to_string()),
            ("limit", params.limit.to_string()),
        ];
        self.fetch(
            "actor_network",
            &Self::path("actor-collaborations"),
            &query,
        )
        .await
    }

    pub async fn rating_distribution(
        &self,
        bucket_size: f32,
    ) -> Result<ApiEnvelope<Vec<RatingBucket>>, ApiError> {
        let query = [("bucketSize", bucket_size.to_string())];
        self.fetch(
            "rating_distribution",
            &Self::path("rating-distribution"),
            &query,
        )
        .await
    }

    pub async fn yearly_trends(
        &self,
        params: &YearlyTrendParams,
    ) -> Result<ApiEnvelope<Vec<YearlyTrend>>, ApiError> {
        let query = [
            ("startYear", params.start_year.to_string()),
            ("endYear", params.end_year.to_string()),
            ("minVotes", params.min_votes.to_string()),
        ];
        self.fetch("yearly_trends", &Self::path("yearly-trends"), &query)
            .await
    }

    pub async fn genre_comparison(
        &self,
        params: &GenreComparisonParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        let mut query = Vec::new();
        push_opt(&mut query, "genres", params.genres.as_ref());
        query.push(("metric", params.metric.clone()));
        self.fetch("genre_comparison", &Self::path("genre-comparison"), &query)
            .await
    }

    pub async fn top_production_companies(
        &self,
        params: &RankingParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        self.fetch(
            "top_production_companies",
            &Self::path("top-production-companies"),
            &params.to_query("metric"),
        )
        .await
    }

    pub async fn genres_with_stats(&self) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        let path = format!("{}/genres/stats", API_PREFIX);
        self.fetch("genres_with_stats", &path, &[]).await
    }

    pub async fn language_distribution(
        &self,
        params: &RankingParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        let query = [
            ("minMovies", params.min_movies.to_string()),
            ("limit", params.limit.to_string()),
        ];
        self.fetch(
            "language_distribution",
            &Self::path("language-distribution"),
            &query,
        )
        .await
    }

    pub async fn top_directors(
        &self,
        params: &RankingParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        self.fetch(
            "top_directors",
            &Self::path("top-directors"),
            &params.to_query("sortBy"),
        )
        .await
    }

    pub async fn top_cinematographers(
        &self,
        params: &RankingParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        self.fetch(
            "top_cinematographers",
            &Self::path("top-cinematographers"),
            &params.to_query("sortBy"),
        )
        .await
    }

    pub async fn top_composers(
        &self,
        params: &RankingParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        self.fetch(
            "top_composers",
            &Self::path("top-composers"),
            &params.to_query("sortBy"),
        )
        .await
    }

    pub async fn cross_role_talents(
        &self,
        params: &RankingParams,
    ) -> Result<ApiEnvelope<Vec<RankingEntry>>, ApiError> {
        self.fetch(
            "cross_role_talents",
            &Self::path("cross-role-talents"),
            &params.to_query("sortBy"),
        )
        .await
    }
}
