//! URL slugs for posts.

use std::path::{Component, Path};

/// Derive a slug from a path relative to the content directory.
///
/// # Examples
///
/// ```ignore
/// slug_from_path("hello.md")               -> "/hello/"
/// slug_from_path("2019/hello/index.md")    -> "/2019/hello/"
/// slug_from_path("index.md")               -> "/"
/// ```
pub fn slug_from_path(rel_path: &Path) -> String {
    let stemmed = rel_path.with_extension("");
    let mut parts: Vec<String> = stemmed
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.last().is_some_and(|last| last == "index") {
        parts.pop();
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Normalize a user-supplied slug to `/segment/.../`.
pub fn normalize_slug(slug: &str) -> String {
    let trimmed = slug.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
