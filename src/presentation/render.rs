use crate::application::ports::RecommendationStatus;
use crate::application::services::ListItemView;
use crate::domain::entities::{Recommendation, Session, UserPreferences};
use std::fmt::Write;

fn status_badges(recommendation: &Recommendation) -> String {
    let mut badges = Vec::new();
    if recommendation.is_new() {
        badges.push("new");
    }
    if recommendation.is_viewed() {
        badges.push("viewed");
    }
    if recommendation.is_saved() {
        badges.push("saved");
    }
    badges.join(",")
}

fn place(recommendation: &Recommendation) -> String {
    let details = recommendation.details();
    [details.location.as_str(), details.country.as_str()]
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 一覧の 1 行分。操作中・エラーがあれば行末に付ける。
pub fn render_item(view: &ListItemView) -> String {
    let rec = &view.recommendation;
    let details = rec.details();
    let mut line = format!(
        "#{id} {title} @ {company} | {place} | {platform} | {score:.0}% ({band}) [{badges}]",
        id = rec.id(),
        title = details.title,
        company = details.company,
        place = place(rec),
        platform = details.platform,
        score = details.similarity_score,
        band = rec.score_band().as_str(),
        badges = status_badges(rec),
    );
    if view.loading {
        line.push_str(" (en cours)");
    }
    if let Some(error) = &view.error {
        let _ = write!(line, " ! {error}");
    }
    line
}

pub fn render_list(views: &[ListItemView]) -> String {
    if views.is_empty() {
        return "Aucune recommandation ne correspond aux filtres.".to_string();
    }
    views.iter().map(render_item).collect::<Vec<_>>().join("\n")
}

/// 詳細表示
pub fn render_detail(view: &ListItemView) -> String {
    let rec = &view.recommendation;
    let details = rec.details();
    let mut out = render_item(view);
    if let Some(duration) = details.duration.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, "\n  Durée: {duration}");
    }
    if !details.domain.is_empty() {
        let _ = write!(out, "\n  Domaine: {}", details.domain);
    }
    let skills = rec.skill_list();
    if !skills.is_empty() {
        let _ = write!(out, "\n  Compétences: {}", skills.join(", "));
    }
    if let Some(at) = rec.recommended_timestamp() {
        let _ = write!(out, "\n  Recommandé le: {}", at.format("%Y-%m-%d %H:%M"));
    }
    if !details.description.is_empty() {
        let _ = write!(out, "\n\n{}", details.description);
    }
    if !details.link.is_empty() {
        let _ = write!(out, "\n\n{}", details.link);
    }
    out
}

pub fn render_status(status: &RecommendationStatus) -> String {
    format!(
        "#{} viewed={} saved={} (user {})",
        status.listing_id, status.is_viewed, status.is_saved, status.user_id
    )
}

pub fn render_session(session: &Session) -> String {
    match (session.access_token(), session.profile()) {
        (None, _) => "Non connecté".to_string(),
        (Some(_), Some(profile)) => {
            let mut out = format!("{} ({})", profile.display_name(), profile.username);
            if let Some(expires_at) = session.expires_at() {
                let _ = write!(out, ", expire le {}", expires_at.format("%Y-%m-%d %H:%M"));
            }
            out
        }
        (Some(_), None) => "Connecté".to_string(),
    }
}

/// 重みを百分率で並べる。国・プラットフォームは名前順。
pub fn render_preferences(preferences: &UserPreferences) -> String {
    let mut out = String::from("Critères:");
    for (name, weight) in preferences.criteria() {
        let _ = write!(out, "\n  {name}: {:.0}%", weight * 100.0);
    }
    for (title, weights) in [
        ("Pays", &preferences.country_weights),
        ("Plateformes", &preferences.platform_weights),
    ] {
        let _ = write!(out, "\n{title}:");
        if weights.is_empty() {
            out.push_str(" -");
        }
        for (name, weight) in weights {
            let _ = write!(out, "\n  {name}: {weight:.1}");
        }
    }
    out
}
