pub mod http;
pub mod storage;

pub use http::{ApiClient, HttpAuthGateway, HttpPreferencesGateway, HttpRecommendationGateway};
pub use storage::FileSessionStore;
