use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::{AppSettings, API_BASE_URL, API_PREFIX, DEFAULT_TIMEOUT};
use crate::error::ApiError;
use crate::normalize::{is_truthy, FallbackIds, MovieNormalizer};

/// Query string as ordered key/value pairs.
pub type Query<'a> = &'a [(&'a str, String)];

/// Rewrites successful response bodies before they reach the caller.
pub trait ResponseInterceptor: Send + Sync {
    fn name(&self) -> &str;

    fn applies_to(&self, path: &str) -> bool;

    fn intercept(&self, path: &str, body: Value) -> Value;
}

/// Normalizes movie records in `data` for the movie resources.
pub struct MovieResponseInterceptor {
    normalizer: MovieNormalizer,
    resources: Vec<String>,
}

impl MovieResponseInterceptor {
    pub fn new(normalizer: MovieNormalizer) -> Self {
        Self {
            normalizer,
            resources: vec![
                format!("{}/movies", API_PREFIX),
                format!("{}/recommendations", API_PREFIX),
            ],
        }
    }
}

impl ResponseInterceptor for MovieResponseInterceptor {
    fn name(&self) -> &str {
        "movie-normalizer"
    }

    fn applies_to(&self, path: &str) -> bool {
        self.resources.iter().any(|r| path.contains(r.as_str()))
    }

    fn intercept(&self, _path: &str, body: Value) -> Value {
        let Value::Object(mut body) = body else {
            return body;
        };
        let data = match body.remove("data") {
            Some(list @ Value::Array(_)) => self.normalizer.normalize_many(list),
            Some(Value::Object(movie))
                if ["id", "tmdb_id"]
                    .iter()
                    .any(|key| movie.get(*key).is_some_and(is_truthy)) =>
            {
                self.normalizer.normalize(Value::Object(movie))
            }
            Some(other) => other,
            None => return Value::Object(body),
        };
        body.insert(String::from("data"), data);
        Value::Object(body)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub default_headers: Vec<(String, String)>,
    pub fallback_ids: FallbackIds,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(API_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![(
                CONTENT_TYPE.as_str().to_string(),
                String::from("application/json"),
            )],
            fallback_ids: FallbackIds::default(),
        }
    }
}

impl ApiClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::with_base_url(settings.api_base_url.clone())
    }
}

/// HTTP client bound to one backend. Clones share the connection pool and
/// interceptor chain.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: Arc<reqwest::Client>,
    interceptors: Arc<Vec<Arc<dyn ResponseInterceptor>>>,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Request(format!("header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Request(format!("header value {}: {}", value, e)))?;
            headers.insert(name, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let normalizer = MovieNormalizer::new(config.fallback_ids);
        let interceptors: Vec<Arc<dyn ResponseInterceptor>> =
            vec![Arc::new(MovieResponseInterceptor::new(normalizer))];

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client: Arc::new(http_client),
            interceptors: Arc::new(interceptors),
        })
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, ApiError> {
        Self::new(ApiClientConfig::from_settings(settings))
    }

    /// Appends an interceptor; it runs after the ones already installed.
    pub fn with_interceptor<I: ResponseInterceptor + 'static>(mut self, interceptor: I) -> Self {
        let mut chain = self.interceptors.as_ref().clone();
        chain.push(Arc::new(interceptor));
        self.interceptors = Arc::new(chain);
        self
    }

    pub fn interceptor_names(&self) -> Vec<&str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, query: Query<'_>) -> Result<Value, ApiError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request(Method::POST, path, query, body).await
    }

    pub async fn put(
        &self,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, query, body).await
    }

    pub async fn delete(&self, path: &str, query: Query<'_>) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, query, None).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> Result<T, ApiError> {
        let body = self.get(path, query).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut builder = self.http_client.request(method.clone(), self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        debug!("{} {}", method, path);
        self.dispatch(path, builder).await
    }

    /// Sends a multipart form. The JSON content type default does not
    /// apply; reqwest sets the multipart boundary header instead.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let builder = self
            .http_client
            .post(self.url(path))
            .multipart(form)
            .timeout(timeout);
        debug!("POST {} (multipart, timeout {:?})", path, timeout);
        self.dispatch(path, builder).await
    }

    async fn dispatch(
        &self,
        path: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(self.intercept(path, body))
    }

    fn intercept(&self, path: &str, body: Value) -> Value {
        self.interceptors
            .iter()
            .filter(|i| i.applies_to(path))
            .fold(body, |body, i| i.intercept(path, body))
    }
}
