use crate::registry::HubProject;
use std::cmp::Reverse;

/// Favorites first, then most recently used, then by title.
pub fn sort_projects(projects: &mut [HubProject]) {
    projects.sort_by(|a, b| {
        b.favorite
            .cmp(&a.favorite)
            .then_with(|| Reverse(a.last_modified).cmp(&Reverse(b.last_modified)))
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

/// Projects whose title or path contains `query`, ignoring case. An empty
/// query matches everything.
pub fn filter_projects<'a>(projects: &'a [HubProject], query: &str) -> Vec<&'a HubProject> {
    let query = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|project| {
            query.is_empty()
                || project.title.to_lowercase().contains(&query)
                || project
                    .path
                    .to_string_lossy()
                    .to_lowercase()
                    .contains(&query)
        })
        .collect()
}
