use crate::api::{log_api_error, push_opt, resource_path};
use crate::client::ApiClient;
use crate::config::{API_PREFIX, PAGINATION};
use crate::error::ApiError;
use crate::movie::{ApiEnvelope, GenreEntry, Movie, MovieId, StatsSummary, YearCount};

pub const DEFAULT_SIMILAR_LIMIT: u32 = 5;
pub const DEFAULT_RANDOM_COUNT: u32 = 5;
pub const DEFAULT_RANDOM_MIN_RATING: f32 = 7.0;

/// Listing filters. List-valued filters such as `genres` are passed through
/// as the caller serialized them (comma-separated).
#[derive(Debug, Clone, PartialEq)]
pub struct MovieListParams {
    pub page: u32,
    pub page_size: u32,
    pub genres: Option<String>,
    pub start_year: Option<u16>,
    pub end_year: Option<u16>,
    pub min_rating: Option<f32>,
    pub max_rating: Option<f32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl Default for MovieListParams {
    fn default() -> Self {
        Self {
            page: PAGINATION.default_page,
            page_size: PAGINATION.default_page_size,
            genres: None,
            start_year: None,
            end_year: None,
            min_rating: None,
            max_rating: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl MovieListParams {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        push_opt(&mut query, "genres", self.genres.as_ref());
        push_opt(&mut query, "startYear", self.start_year);
        push_opt(&mut query, "endYear", self.end_year);
        push_opt(&mut query, "minRating", self.min_rating);
        push_opt(&mut query, "maxRating", self.max_rating);
        push_opt(&mut query, "sortBy", self.sort_by.as_ref());
        push_opt(&mut query, "sortOrder", self.sort_order.as_ref());
        query
    }
}

#[derive(Clone)]
pub struct MovieApi {
    client: ApiClient,
}

impl MovieApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.client
            .get_json(path, query)
            .await
            .map_err(|e| log_api_error(operation, e))
    }

    pub async fn get_all_movies(
        &self,
        params: &MovieListParams,
    ) -> Result<ApiEnvelope<Vec<Movie>>, ApiError> {
        let path = format!("{}/movies/all", API_PREFIX);
        self.fetch("get_all_movies", &path, &params.to_query())
            .await
    }

    pub async fn get_movies(
        &self,
        params: &MovieListParams,
    ) -> Result<ApiEnvelope<Vec<Movie>>, ApiError> {
        let path = format!("{}/movies", API_PREFIX);
        self.fetch("get_movies", &path, &params.to_query()).await
    }

    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ApiEnvelope<Vec<Movie>>, ApiError> {
        let path = format!("{}/movies/search", API_PREFIX);
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.fetch("search_movies", &path, &params).await
    }

    pub async fn get_movie(&self, id: &MovieId) -> Result<ApiEnvelope<Movie>, ApiError> {
        let id = id.to_string();
        let path = resource_path(&["movies", &id]).map_err(|e| log_api_error("get_movie", e))?;
        self.fetch("get_movie", &path, &[]).await
    }

    pub async fn get_similar_movies(
        &self,
        id: &MovieId,
        limit: u32,
    ) -> Result<ApiEnvelope<Vec<Movie>>, ApiError> {
        let id = id.to_string();
        let path = resource_path(&["movies", &id, "similar"])
            .map_err(|e| log_api_error("get_similar_movies", e))?;
        self.fetch("get_similar_movies", &path, &[("limit", limit.to_string())])
            .await
    }

    pub async fn get_genres(&self) -> Result<ApiEnvelope<Vec<GenreEntry>>, ApiError> {
        let path = format!("{}/genres", API_PREFIX);
        self.fetch("get_genres", &path, &[]).await
    }

    pub async fn get_stats(&self) -> Result<ApiEnvelope<StatsSummary>, ApiError> {
        let path = format!("{}/stats/summary", API_PREFIX);
        self.fetch("get_stats", &path, &[]).await
    }

    pub async fn get_movies_by_year(&self) -> Result<ApiEnvelope<Vec<YearCount>>, ApiError> {
        let path = format!("{}/stats/years", API_PREFIX);
        self.fetch("get_movies_by_year", &path, &[]).await
    }

    pub async fn get_random_movies(
        &self,
        count: u32,
        min_rating: f32,
    ) -> Result<ApiEnvelope<Vec<Movie>>, ApiError> {
        let path = format!("{}/recommendations/random", API_PREFIX);
        let params = [
            ("count", count.to_string()),
            ("minRating", min_rating.to_string()),
        ];
        self.fetch("get_random_movies", &path, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing_query() {
        let query = MovieListParams::default().to_query();
        assert_eq!(
            query,
            vec![("page", String::from("1")), ("pageSize", String::from("20"))]
        );
    }

    #[test]
    fn filters_are_appended_when_set() {
        let params = MovieListParams {
            genres: Some(String::from("Action,Drama")),
            start_year: Some(1995),
            min_rating: Some(7.5),
            sort_by: Some(String::from("vote_average")),
            ..MovieListParams::page(3, 50)
        };
        let query = params.to_query();
        assert!(query.contains(&("page", String::from("3"))));
        assert!(query.contains(&("pageSize", String::from("50"))));
        assert!(query.contains(&("genres", String::from("Action,Drama"))));
        assert!(query.contains(&("startYear", String::from("1995"))));
        assert!(query.contains(&("minRating", String::from("7.5"))));
        assert!(query.contains(&("sortBy", String::from("vote_average"))));
        assert!(!query.iter().any(|(k, _)| *k == "endYear"));
    }
}
