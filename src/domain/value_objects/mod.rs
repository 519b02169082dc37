pub mod access_token;
pub mod listing_id;
pub mod recommendation_action;
pub mod status_field;

pub use access_token::AccessToken;
pub use listing_id::ListingId;
pub use recommendation_action::RecommendationAction;
pub use status_field::StatusField;
