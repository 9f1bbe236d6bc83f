use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::theme::ThemeMode;

pub const API_BASE_URL: &str = "http://localhost:3000";
pub const API_PREFIX: &str = "/api/v1";
pub const API_URL_ENV: &str = "FILMDASH_API_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

pub struct Pagination {
    pub default_page: u32,
    pub default_page_size: u32,
    pub options: [u32; 4],
}

pub const PAGINATION: Pagination = Pagination {
    default_page: 1,
    default_page_size: 20,
    options: [10, 20, 50, 100],
};

pub const YEAR_RANGE: RangeInclusive<u16> = 1990..=2023;
pub const RATING_RANGE: RangeInclusive<u8> = 0..=10;

pub const VALID_GENRES: [&str; 19] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "TV Movie",
    "Thriller",
    "War",
    "Western",
];

pub fn is_valid_genre(name: &str) -> bool {
    VALID_GENRES.iter().any(|g| g.eq_ignore_ascii_case(name.trim()))
}

pub struct ChartColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub gradient: [&'static str; 10],
}

pub const CHART_COLORS: ChartColors = ChartColors {
    primary: "#0072F5",
    secondary: "#F5A300",
    success: "#17C964",
    warning: "#F5A524",
    error: "#F31260",
    gradient: [
        "#3B82F6", "#6366F1", "#8B5CF6", "#A855F7", "#D946EF", "#EC4899", "#F43F5E", "#FB7185",
        "#FCA5A5", "#FCD34D",
    ],
};

impl ChartColors {
    /// Gradient color for the n-th series, wrapping around.
    pub fn series(&self, index: usize) -> &'static str {
        self.gradient[index % self.gradient.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
    Table,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::List => write!(f, "list"),
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::Table => write!(f, "table"),
        }
    }
}

/// Client-side cache switch. Nothing in this crate caches responses;
/// the values are exported for consumers that want to.
pub struct CacheConfig {
    pub enabled: bool,
    pub duration: Duration,
}

pub const CACHE: CacheConfig = CacheConfig {
    enabled: true,
    duration: Duration::from_secs(5 * 60),
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub theme_preference: ThemeMode,
}

fn default_base_url() -> String {
    String::from(API_BASE_URL)
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            theme_preference: ThemeMode::default(),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("filmdash")
                .join("config.json")
        })
    }

    /// Environment first, then the settings file, then compiled defaults.
    pub fn load() -> Self {
        let mut settings = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        };
        settings.apply_env_override(std::env::var(API_URL_ENV).ok());
        settings
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigPath)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
    }
}
