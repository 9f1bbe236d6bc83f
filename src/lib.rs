//! Client library for the movie dashboard backend: HTTP plumbing, record
//! normalization, typed API operations, theming and notifications.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod movie;
pub mod normalize;
pub mod notify;
pub mod routes;
pub mod theme;
pub mod visualization;

pub use api::Api;
pub use client::{ApiClient, ApiClientConfig};
pub use error::{ApiError, ErrorCategory};
pub use normalize::{FallbackIds, MovieNormalizer};
pub use notify::Notifier;
pub use theme::ThemeMode;
