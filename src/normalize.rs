//! Coerces raw movie records from the backend into one canonical shape.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

pub const IMDB_PREFIX: &str = "tt";

/// Fields that may arrive as a comma-delimited string or as an array.
pub const MULTI_VALUED_FIELDS: [&str; 5] = [
    "genres",
    "cast",
    "directors",
    "production_companies",
    "production_countries",
];

/// Where a fallback `id` comes from when a record carries no identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackIds {
    /// Fresh UUID per call; never repeats within a session.
    #[default]
    Random,
    /// SHA-256 of the record, so identical input yields identical ids.
    ContentHash,
}

#[derive(Debug, Clone, Default)]
pub struct MovieNormalizer {
    fallback: FallbackIds,
}

impl MovieNormalizer {
    pub fn new(fallback: FallbackIds) -> Self {
        Self { fallback }
    }

    /// Returns a corrected copy of `raw`. Anything that is not a JSON
    /// object (including `null`) comes back untouched.
    pub fn normalize(&self, raw: Value) -> Value {
        let Value::Object(mut movie) = raw else {
            return raw;
        };

        if let Some(Value::String(imdb_id)) = movie.get_mut("imdb_id") {
            if !imdb_id.is_empty() && !imdb_id.starts_with(IMDB_PREFIX) {
                imdb_id.insert_str(0, IMDB_PREFIX);
            }
        }

        if !movie.get("id").is_some_and(is_truthy) {
            let id = ["tmdb_id", "_id"]
                .iter()
                .filter_map(|key| movie.get(*key))
                .find(|v| is_truthy(v))
                .cloned()
                .unwrap_or_else(|| Value::String(self.fallback_id(&movie)));
            movie.insert(String::from("id"), id);
        }

        for field in MULTI_VALUED_FIELDS {
            let normalized = match movie.remove(field) {
                Some(Value::Array(items)) => Value::Array(items),
                Some(Value::String(joined)) => Value::Array(
                    split_multi_value(&joined)
                        .into_iter()
                        .map(Value::String)
                        .collect(),
                ),
                _ => Value::Array(Vec::new()),
            };
            movie.insert(field.to_string(), normalized);
        }

        Value::Object(movie)
    }

    /// Applies [`normalize`](Self::normalize) to every element of an array,
    /// or to the value itself otherwise.
    pub fn normalize_many(&self, raw: Value) -> Value {
        match raw {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|m| self.normalize(m)).collect())
            }
            other => self.normalize(other),
        }
    }

    fn fallback_id(&self, movie: &Map<String, Value>) -> String {
        match self.fallback {
            FallbackIds::Random => uuid::Uuid::new_v4().simple().to_string(),
            FallbackIds::ContentHash => {
                let canonical = Value::Object(movie.clone()).to_string();
                let digest = Sha256::digest(canonical.as_bytes());
                digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
            }
        }
    }
}

/// Splits `"Action, Comedy,  Drama"` into trimmed, non-empty pieces.
pub fn split_multi_value(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
