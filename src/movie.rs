use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::normalize::MovieNormalizer;

/// Movie identifier; the backend uses both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{}", n),
            MovieId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        MovieId::Number(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        MovieId::Text(id.to_string())
    }
}

/// A multi-valued field (genres, cast, ...) as the backend served it:
/// plain names or `{ "name": .. }` records. A comma-delimited string is
/// split into names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameList(#[serde(deserialize_with = "lenient::value_list")] pub Vec<Value>);

impl NameList {
    /// Display names, skipping entries that carry none.
    pub fn names(&self) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj.get("name")?.as_str().map(String::from),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn joined(&self, separator: &str) -> String {
        self.names().join(separator)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A movie record. Deserialization runs the record through
/// [`MovieNormalizer`] first, so any object decodes: missing or oddly typed
/// fields fall back to defaults and unknown fields land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Movie {
    #[serde(deserialize_with = "lenient::movie_id")]
    pub id: MovieId,
    #[serde(default, deserialize_with = "lenient::display_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub original_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub runtime: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: NameList,
    #[serde(default)]
    pub cast: NameList,
    #[serde(default)]
    pub directors: NameList,
    #[serde(default)]
    pub production_companies: NameList,
    #[serde(default)]
    pub production_countries: NameList,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_movie_id")]
    pub tmdb_id: Option<MovieId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Serialize for Movie {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Movie::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Movie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = MovieNormalizer::default().normalize(Value::deserialize(deserializer)?);
        Movie::deserialize(raw).map_err(serde::de::Error::custom)
    }
}

impl Movie {
    pub fn year(&self) -> Option<u16> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Return on investment as a ratio, when both financials are known.
    pub fn roi(&self) -> Option<f64> {
        match (self.budget, self.revenue) {
            (Some(budget), Some(revenue)) if budget > 0.0 => Some((revenue - budget) / budget),
            _ => None,
        }
    }
}

/// Standard response body: `data` plus whatever else the server sent
/// alongside it (pagination, messages), kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl<T> ApiEnvelope<T> {
    pub fn total(&self) -> Option<u64> {
        ["total", "totalCount", "count"]
            .iter()
            .find_map(|key| self.meta.get(*key)?.as_u64())
    }

    pub fn message(&self) -> Option<&str> {
        self.meta.get("message").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_movies: u64,
    #[serde(default, deserialize_with = "lenient::display_string")]
    pub avg_rating: String,
    #[serde(default)]
    pub highest_rated: Option<MovieHighlight>,
    #[serde(default)]
    pub most_popular: Option<MovieHighlight>,
    #[serde(default)]
    pub longest_movie: Option<MovieHighlight>,
}

/// A display-ready record for one of the summary superlatives. Only the
/// metric relevant to the superlative is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieHighlight {
    #[serde(deserialize_with = "lenient::display_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_display_string")]
    pub vote_average: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_display_string")]
    pub vote_count: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_display_string")]
    pub runtime: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_display_string")]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub year: u64,
    #[serde(default, alias = "movie_count", deserialize_with = "lenient::u64_or_zero")]
    pub count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreEntry {
    Name(String),
    Record {
        name: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl GenreEntry {
    pub fn name(&self) -> &str {
        match self {
            GenreEntry::Name(name) | GenreEntry::Record { name, .. } => name,
        }
    }
}

/// Deserializers that accept the loose encodings the backend produces:
/// numbers as strings, lists as delimited strings.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::MovieId;
    use crate::normalize::split_multi_value;

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(as_f64(&Value::deserialize(d)?))
    }

    pub fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(as_f64(&Value::deserialize(d)?)
            .filter(|f| *f >= 0.0)
            .map(|f| f as u64))
    }

    pub fn u64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(opt_u64(d)?.unwrap_or(0))
    }

    fn display(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn display_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(display(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_display_string<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(display(Value::deserialize(d)?))
    }

    /// Scalars as text; anything else is treated as absent.
    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    fn to_movie_id(value: Value) -> Option<MovieId> {
        match value {
            Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => MovieId::Number(i),
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    MovieId::Number(f as i64)
                }
                _ => MovieId::Text(n.to_string()),
            }),
            Value::String(s) if !s.is_empty() => Some(MovieId::Text(s)),
            Value::Null | Value::String(_) => None,
            other => Some(MovieId::Text(other.to_string())),
        }
    }

    /// Integral numbers (including `27205.0`) become numeric ids, anything
    /// else its text form.
    pub fn movie_id<'de, D: Deserializer<'de>>(d: D) -> Result<MovieId, D::Error> {
        to_movie_id(Value::deserialize(d)?)
            .ok_or_else(|| serde::de::Error::custom("movie id is empty"))
    }

    pub fn opt_movie_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<MovieId>, D::Error> {
        Ok(to_movie_id(Value::deserialize(d)?))
    }

    /// Arrays as served; a comma-delimited string is split into names.
    pub fn value_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items,
            Value::String(joined) => split_multi_value(&joined)
                .into_iter()
                .map(Value::String)
                .collect(),
            _ => Vec::new(),
        })
    }
}
