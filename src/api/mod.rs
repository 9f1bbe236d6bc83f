//! Typed operations over the dashboard backend, grouped by resource.

pub mod import;
pub mod movies;
pub mod visualization;

use tracing::error;

use crate::client::ApiClient;
use crate::config::API_PREFIX;
use crate::error::{ApiError, ErrorCategory};

pub use import::{CsvUpload, ImportApi, ImportResult, ProgressCallback, UploadProgress};
pub use movies::{MovieApi, MovieListParams};
pub use visualization::VisualizationApi;

/// All resource groups, sharing one client.
#[derive(Clone)]
pub struct Api {
    pub movies: MovieApi,
    pub visualization: VisualizationApi,
    pub import: ImportApi,
}

impl Api {
    pub fn new(client: ApiClient) -> Self {
        Self {
            movies: MovieApi::new(client.clone()),
            visualization: VisualizationApi::new(client.clone()),
            import: ImportApi::new(client),
        }
    }
}

/// Logs `err` according to where it happened and hands it back so the
/// caller can propagate it.
pub fn log_api_error(operation: &str, err: ApiError) -> ApiError {
    match (&err, err.category()) {
        (ApiError::Status { status, body }, _) => {
            error!(operation, status, body = %body, "API request failed with error status");
        }
        (_, ErrorCategory::Application) => {
            error!(operation, "API response could not be read: {}", err);
        }
        (_, ErrorCategory::Transport) => {
            error!(operation, "No response received: {}", err);
        }
        (_, ErrorCategory::Construction) => {
            error!(operation, "Request could not be sent: {}", err);
        }
    }
    err
}

/// Appends `key=value` when the value is present.
pub(crate) fn push_opt<T: ToString>(
    query: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

/// `API_PREFIX` followed by `segments`, each percent-encoded as a single
/// path segment so ids containing `/`, `?` or `#` stay inside it.
pub(crate) fn resource_path(segments: &[&str]) -> Result<String, ApiError> {
    let mut url = reqwest::Url::parse("http://localhost/")
        .map_err(|e| ApiError::Request(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Request(String::from("URL cannot carry a path")))?
        .extend(API_PREFIX.split('/').filter(|s| !s.is_empty()))
        .extend(segments);
    Ok(url.path().to_string())
}

/// Current calendar year, the default upper bound for year ranges.
pub(crate) fn current_year() -> u16 {
    use chrono::Datelike;
    chrono::Local::now().year() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_errors_are_returned_unchanged() {
        let err = log_api_error(
            "search_movies",
            ApiError::Status {
                status: 503,
                body: String::from("maintenance"),
            },
        );
        assert_eq!(err.status(), Some(503));

        let err = log_api_error("get_genres", ApiError::Transport(String::from("refused")));
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn push_opt_skips_missing_values() {
        let mut query = Vec::new();
        push_opt(&mut query, "genres", None::<String>);
        push_opt(&mut query, "minRating", Some(6.5));
        assert_eq!(query, vec![("minRating", String::from("6.5"))]);
    }

    #[test]
    fn resource_path_encodes_each_segment() {
        assert_eq!(
            resource_path(&["movies", "27205", "similar"]).unwrap(),
            "/api/v1/movies/27205/similar"
        );
        assert_eq!(
            resource_path(&["movies", "a/b?c#d"]).unwrap(),
            "/api/v1/movies/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
