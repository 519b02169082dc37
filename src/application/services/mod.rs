pub mod auth_service;
pub mod optimistic_tracker;
pub mod preferences_service;
pub mod recommendation_actions;
pub mod recommendation_explorer;
pub mod recommendation_filter;

pub use auth_service::AuthService;
pub use optimistic_tracker::OptimisticTracker;
pub use preferences_service::{PreferenceUpdate, PreferencesService};
pub use recommendation_actions::RecommendationActions;
pub use recommendation_explorer::{
    InteractionOutcome, ItemInteraction, ListItemView, RecommendationExplorer,
};
pub use recommendation_filter::{
    ListCriteria, LocationFilter, RecommendationFilter, SortOrder, StatusFilter, filter_and_sort,
};
