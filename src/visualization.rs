//! Aggregate datasets returned by the visualization endpoints.
//!
//! The backend reports most numeric aggregates as preformatted strings, so
//! bucket bounds and averages are parsed leniently. Fields this crate does
//! not model are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::movie::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRevenueBucket {
    #[serde(deserialize_with = "lenient::display_string")]
    pub budget_bucket: String,
    #[serde(default, deserialize_with = "lenient::display_string")]
    pub budget_bucket_end: String,
    #[serde(default, deserialize_with = "lenient::display_string")]
    pub avg_revenue: String,
    #[serde(default, deserialize_with = "lenient::display_string")]
    pub avg_roi: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub movie_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeBucket {
    #[serde(deserialize_with = "lenient::display_string")]
    pub bucket_start: String,
    #[serde(default, deserialize_with = "lenient::display_string")]
    pub bucket_end: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub movie_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Same layout as [`RuntimeBucket`], over vote averages.
pub type RatingBucket = RuntimeBucket;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTrend {
    #[serde(deserialize_with = "lenient::u64_or_zero")]
    pub year: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub movie_count: u64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_revenue: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of a ranking: a genre, company, director, cinematographer,
/// composer, language or cross-role talent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(
        alias = "genre",
        alias = "company",
        alias = "language",
        deserialize_with = "lenient::display_string"
    )]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub movie_count: u64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub avg_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub total_revenue: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RankingEntry {
    /// Reads any additional numeric metric, e.g. `avg_budget` or `avg_roi`.
    pub fn metric(&self, key: &str) -> Option<f64> {
        match self.extra.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorNode {
    #[serde(deserialize_with = "lenient::display_string")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub value: u64,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub symbol_size: Option<f64>,
    #[serde(default)]
    pub category: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorLink {
    #[serde(deserialize_with = "lenient::display_string")]
    pub source: String,
    #[serde(deserialize_with = "lenient::display_string")]
    pub target: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActorNetwork {
    #[serde(default)]
    pub nodes: Vec<ActorNode>,
    #[serde(default)]
    pub links: Vec<ActorLink>,
    #[serde(default)]
    pub categories: Vec<ActorCategory>,
}

impl ActorNetwork {
    pub fn node(&self, id: &str) -> Option<&ActorNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn category_name(&self, node: &ActorNode) -> Option<&str> {
        self.categories.get(node.category).map(|c| c.name.as_str())
    }

    /// Collaborators of `id`, heaviest link first.
    pub fn collaborators(&self, id: &str) -> Vec<(&ActorNode, u64)> {
        let mut found: Vec<(&ActorNode, u64)> = self
            .links
            .iter()
            .filter_map(|link| {
                let other = if link.source == id {
                    &link.target
                } else if link.target == id {
                    &link.source
                } else {
                    return None;
                };
                self.node(other).map(|node| (node, link.value))
            })
            .collect();
        found.sort_by(|a, b| b.1.cmp(&a.1));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn budget_buckets_accept_string_aggregates() {
        let bucket: BudgetRevenueBucket = serde_json::from_value(json!({
            "budget_bucket": "10000000",
            "budget_bucket_end": 20000000,
            "avg_revenue": "48211543.22",
            "avg_roi": "2.41",
            "movie_count": "311",
            "median_revenue": "30000000"
        }))
        .unwrap();
        assert_eq!(bucket.budget_bucket_end, "20000000");
        assert_eq!(bucket.movie_count, 311);
        assert_eq!(bucket.extra["median_revenue"], json!("30000000"));
    }

    #[test]
    fn ranking_entries_read_aliases_and_metrics() {
        let entry: RankingEntry = serde_json::from_value(json!({
            "company": "Warner Bros.",
            "movie_count": 319,
            "avg_rating": "6.3",
            "avg_roi": "3.1"
        }))
        .unwrap();
        assert_eq!(entry.name, "Warner Bros.");
        assert_eq!(entry.avg_rating, Some(6.3));
        assert_eq!(entry.metric("avg_roi"), Some(3.1));
        assert_eq!(entry.metric("missing"), None);
    }

    #[test]
    fn actor_network_lookups() {
        let network: ActorNetwork = serde_json::from_value(json!({
            "nodes": [
                { "id": "Tom Hanks", "name": "Tom Hanks", "value": 12, "symbolSize": 40 },
                { "id": "Meg Ryan", "name": "Meg Ryan", "value": 3, "category": 1 },
                { "id": "Tim Allen", "name": "Tim Allen", "value": 4, "category": 1 }
            ],
            "links": [
                { "source": "Tom Hanks", "target": "Meg Ryan", "value": 3 },
                { "source": "Tim Allen", "target": "Tom Hanks", "value": 4 }
            ],
            "categories": [{ "name": "Center" }, { "name": "Collaborator" }]
        }))
        .unwrap();

        let center = network.node("Tom Hanks").unwrap();
        assert_eq!(network.category_name(center), Some("Center"));
        assert_eq!(center.symbol_size, Some(40.0));
        let collaborators: Vec<(&str, u64)> = network
            .collaborators("Tom Hanks")
            .into_iter()
            .map(|(node, weight)| (node.name.as_str(), weight))
            .collect();
        assert_eq!(collaborators, vec![("Tim Allen", 4), ("Meg Ryan", 3)]);
        assert!(network.collaborators("Nobody").is_empty());
    }

    #[test]
    fn empty_network_parses() {
        let network: ActorNetwork = serde_json::from_value(json!({})).unwrap();
        assert_eq!(network, ActorNetwork::default());
    }
}
