use crate::application::services::{
    ListCriteria, LocationFilter, PreferenceUpdate, RecommendationFilter, SortOrder, StatusFilter,
};
use crate::domain::value_objects::ListingId;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stage-explorer")]
#[command(about = "Browse and triage internship recommendations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides STAGE_EXPLORER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long, env = "STAGE_EXPLORER_USERNAME")]
        username: String,
        #[arg(short, long, env = "STAGE_EXPLORER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (log in afterwards)
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "STAGE_EXPLORER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List recommendations with optional filters
    List(ListArgs),
    /// Show one recommendation and mark it as viewed
    View { id: ListingId },
    /// Save or unsave a recommendation
    ToggleSave { id: ListingId },
    /// Show the server-side status of a recommendation
    Status { id: ListingId },
    /// Set status flags directly
    SetStatus {
        id: ListingId,
        #[arg(long)]
        saved: Option<bool>,
        #[arg(long)]
        viewed: Option<bool>,
    },
    /// Show or change recommendation weights
    #[command(subcommand)]
    Preferences(PreferencesCommand),
}

#[derive(Debug, Subcommand)]
pub enum PreferencesCommand {
    /// Show the current weights
    Show,
    /// Change some weights and save them
    Set(PreferenceArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct PreferenceArgs {
    /// Weight of the domain match (0 to 1)
    #[arg(long)]
    pub domain_weight: Option<f64>,

    /// Weight of the skills match (0 to 1)
    #[arg(long)]
    pub skills_weight: Option<f64>,

    /// Weight of the title match (0 to 1)
    #[arg(long)]
    pub title_weight: Option<f64>,

    /// Weight of the description match (0 to 1)
    #[arg(long)]
    pub description_weight: Option<f64>,

    /// Country weight as NAME=WEIGHT, 0 to 2 (repeatable)
    #[arg(long = "country", value_parser = parse_named_weight)]
    pub countries: Vec<(String, f64)>,

    /// Platform weight as NAME=WEIGHT, 0 to 2 (repeatable)
    #[arg(long = "platform", value_parser = parse_named_weight)]
    pub platforms: Vec<(String, f64)>,
}

impl PreferenceArgs {
    pub fn update(&self) -> PreferenceUpdate {
        PreferenceUpdate {
            domain_weight: self.domain_weight,
            skills_weight: self.skills_weight,
            title_weight: self.title_weight,
            description_weight: self.description_weight,
            country_weights: self.countries.clone(),
            platform_weights: self.platforms.clone(),
        }
    }
}

fn parse_named_weight(raw: &str) -> Result<(String, f64), String> {
    let (name, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=WEIGHT, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid weight in '{raw}': {err}"))?;
    Ok((name.to_string(), weight))
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text search on title, company, description, skills and domain
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Country to keep, or "all"
    #[arg(long, default_value = "all")]
    pub location: LocationFilter,

    /// Platforms to keep (repeatable)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Status filters: new, viewed, saved (repeatable)
    #[arg(long = "status")]
    pub statuses: Vec<StatusFilter>,

    /// Sort order: match, date, company
    #[arg(long, default_value = "match")]
    pub sort: SortOrder,
}

impl ListArgs {
    pub fn criteria(&self) -> ListCriteria {
        ListCriteria {
            filter: RecommendationFilter {
                query: self.search.clone(),
                location: self.location.clone(),
                platforms: self.platforms.iter().cloned().collect(),
                statuses: self.statuses.iter().copied().collect(),
            },
            sort: self.sort,
        }
    }
}
