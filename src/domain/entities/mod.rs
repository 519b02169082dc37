pub mod pending_update;
pub mod recommendation;
pub mod session;
pub mod user_preferences;
pub mod user_profile;

pub use pending_update::PendingUpdate;
pub use recommendation::{ListingDetails, Recommendation, ScoreBand};
pub use session::Session;
pub use user_preferences::{MAX_CRITERION_WEIGHT, MAX_MARKET_WEIGHT, UserPreferences};
pub use user_profile::UserProfile;
