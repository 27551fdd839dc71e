use chrono::Local;
use discovery_core::{Phase, Preferences, Project, SessionView};

/// Text for the feed card, or a status line when nothing can be shown.
pub fn render_session(view: &SessionView, is_starred: bool) -> Vec<String> {
    if view.loading {
        return vec!["… loading recommendations".to_string()];
    }
    match (&view.current, view.phase) {
        (Some(project), _) => {
            let mut lines = vec![format!(
                "[{}/{}]{}",
                view.cursor + 1,
                view.queue_len,
                if is_starred { " ★ starred" } else { "" }
            )];
            lines.extend(render_project(project));
            lines
        }
        (None, Phase::Idle) => vec!["session not started".to_string()],
        (None, _) => {
            let mut lines = vec!["no project to show; send feedback or `show` later".to_string()];
            if let Some(err) = &view.last_error {
                lines.push(format!("last fetch failed: {err}"));
            }
            lines
        }
    }
}

pub fn render_project(project: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("{}  ★ {}", project.name, project.stars),
        project.description.clone(),
        format!("Language: {}", project.language),
        format!(
            "Last updated: {}",
            project.last_updated.with_timezone(&Local).format("%Y-%m-%d")
        ),
    ];
    if !project.topics.is_empty() {
        lines.push(format!("Topics: {}", project.topics.join(", ")));
    }
    lines.push(project.url.clone());
    lines
}

pub fn render_preferences(preferences: &Preferences) -> Vec<String> {
    let tags = if preferences.tags.is_empty() {
        "(none)".to_string()
    } else {
        preferences.tags.iter().collect::<Vec<_>>().join(", ")
    };
    vec![
        format!("Tags: {tags}"),
        format!("Stars: {} – {}", preferences.min_stars, preferences.max_stars),
        format!("Server: {}", preferences.server_url),
    ]
}

pub fn render_starred(projects: &[Project]) -> Vec<String> {
    if projects.is_empty() {
        return vec!["No starred projects yet.".to_string()];
    }
    projects
        .iter()
        .map(|project| format!("★ {}  ({} stars)  {}", project.name, project.stars, project.url))
        .collect()
}
