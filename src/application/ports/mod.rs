pub mod action_observer;
pub mod auth_gateway;
pub mod preferences_gateway;
pub mod recommendation_gateway;
pub mod session_store;

pub use action_observer::ActionObserver;
pub use auth_gateway::AuthGateway;
pub use preferences_gateway::PreferencesGateway;
pub use recommendation_gateway::{
    RecommendationGateway, RecommendationStatus, StatusChange, StatusPatch,
};
pub use session_store::SessionStore;
