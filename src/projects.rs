use std::collections::HashSet;

/// Project every filename to its top-level path segment and deduplicate,
/// preserving first-occurrence order.
///
/// The top-level segment is the substring before the first `/`. A filename
/// with no `/` (a file at the repository root) counts as its own project.
pub fn distinct_top_level_projects<'a, I>(filenames: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut projects = Vec::new();

    for filename in filenames {
        let project = match filename.split_once('/') {
            Some((first, _)) => first,
            None => filename,
        };
        if seen.insert(project.to_string()) {
            projects.push(project.to_string());
        }
    }

    projects
}
