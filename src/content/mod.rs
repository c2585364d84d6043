//! Content discovery: find posts, load them, and pick what gets listed.
//!
//! ```text
//! posts/**/*.md ──▶ load (parallel) ──▶ filter ──▶ sort ──▶ limit ──▶ group
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;

use crate::archive::{InputOrder, InvalidDateError, MonthBucket, group_by_month};
use crate::config::{BuildConfig, SiteConfig, SortOrder};
use crate::{debug, log};
use crate::post::Post;

/// Markdown file extensions picked up as posts.
const POST_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Posts chosen for listing, with counts of what was left out.
#[derive(Debug, Default)]
pub struct Selection {
    pub posts: Vec<Post>,
    pub drafts: usize,
    pub excluded: usize,
    pub over_limit: usize,
}

impl Selection {
    /// Total posts found before filtering.
    pub fn total(&self) -> usize {
        self.posts.len() + self.drafts + self.excluded + self.over_limit
    }
}

/// Collect Markdown files under `dir`, sorted by path.
pub fn collect_post_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!(
            "content directory not found: {}\n  hint: set build.content or pass --content",
            dir.display()
        );
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).skip_hidden(true).follow_links(true) {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        let path = entry.path();
        if !is_post_file(&path) {
            continue;
        }
        let file_type = if entry.file_type().is_symlink() {
            fs::metadata(&path)
                .with_context(|| format!("failed to resolve link {}", path.display()))?
                .file_type()
        } else {
            entry.file_type()
        };
        if file_type.is_file() {
            files.push(path);
        } else if !file_type.is_dir() {
            log!("scan"; "skipping {}: not a regular file", path.display());
        }
    }
    files.sort();
    Ok(files)
}

fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| POST_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Load every post under the configured content directory.
///
/// Files are parsed in parallel; if any fails, the first failure in path
/// order is returned and nothing is listed.
pub fn load_posts(config: &SiteConfig) -> Result<Vec<Post>> {
    let content_dir = config.content_dir();
    let files = collect_post_files(&content_dir)?;

    let results: Vec<Result<Post>> = files
        .par_iter()
        .map(|file| Post::load(file, &content_dir))
        .collect();

    results.into_iter().collect()
}

/// Filter, sort and truncate loaded posts per `[build]`.
pub fn select(posts: Vec<Post>, build: &BuildConfig) -> Selection {
    let mut selection = Selection::default();

    let mut kept: Vec<Post> = Vec::with_capacity(posts.len());
    for post in posts {
        if post.is_draft() && !build.drafts {
            debug!("scan"; "skipping draft {}", post.path.display());
            selection.drafts += 1;
        } else if post.has_any_tag(&build.exclude_tags) {
            debug!("scan"; "skipping excluded {}", post.path.display());
            selection.excluded += 1;
        } else {
            kept.push(post);
        }
    }

    // Stable sorts: equal dates keep path order
    match build.sort {
        SortOrder::Desc => kept.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Asc => kept.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::None => {}
    }

    if kept.len() > build.limit {
        selection.over_limit = kept.len() - build.limit;
        kept.truncate(build.limit);
    }

    selection.posts = kept;
    selection
}

/// Group selected posts by month.
///
/// Sorted listings take the contiguous fast path; unsorted ones need the
/// full key lookup.
pub fn group_posts(
    posts: Vec<Post>,
    sort: SortOrder,
) -> Result<Vec<MonthBucket<Post>>, InvalidDateError> {
    let order = match sort {
        SortOrder::Desc | SortOrder::Asc => InputOrder::PreSorted,
        SortOrder::None => InputOrder::Unsorted,
    };
    group_by_month(posts, order)
}
