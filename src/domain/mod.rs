pub mod entities;
pub mod value_objects;

pub use entities::{PendingUpdate, Recommendation, Session, UserProfile};
pub use value_objects::{AccessToken, ListingId, RecommendationAction, StatusField};
