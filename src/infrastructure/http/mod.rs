pub mod auth_api;
pub mod client;
pub mod preferences_api;
pub mod recommendation_api;

pub use auth_api::HttpAuthGateway;
pub use client::ApiClient;
pub use preferences_api::HttpPreferencesGateway;
pub use recommendation_api::HttpRecommendationGateway;
