use crate::application::dto::{ProjectDto, ProjectOverview};
use std::fmt::Write;

/// Plain-text dashboard: one section per status, projects in report order.
pub fn render_overview(overview: &ProjectOverview) -> String {
    let width = [
        &overview.running,
        &overview.stopped,
        &overview.not_started,
        &overview.unknown,
    ]
    .iter()
    .flat_map(|group| group.iter())
    .map(|p| p.name.len())
    .max()
    .unwrap_or(0);

    let mut out = String::new();
    render_group(&mut out, "Running", &overview.running, width);
    render_group(&mut out, "Stopped", &overview.stopped, width);
    render_group(&mut out, "Not started", &overview.not_started, width);
    if !overview.unknown.is_empty() {
        render_group(&mut out, "Unknown", &overview.unknown, width);
    }

    if let Some(fetched_at) = &overview.fetched_at {
        let _ = writeln!(out, "{} projects, refreshed {}", overview.total_count(), fetched_at);
    }
    out
}

fn render_group(out: &mut String, title: &str, projects: &[ProjectDto], width: usize) {
    let _ = writeln!(out, "{} ({})", title, projects.len());
    for project in projects {
        if project.ports.is_empty() {
            let _ = writeln!(out, "  {}", project.name);
        } else {
            let _ = writeln!(out, "  {:<width$}  {}", project.name, project.ports, width = width);
        }
    }
    out.push('\n');
}
