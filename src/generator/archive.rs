//! Month-grouped archive output (`archive.json`).
//!
//! The archive is what the index page template consumes: one section per
//! month, one summary per post.
//!
//! ```json
//! {
//!   "title": "Notes",
//!   "total": 2,
//!   "months": [
//!     { "key": "March 2023", "entries": [ { "slug": "/hello/", ... } ] }
//!   ]
//! }
//! ```

use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::archive::{Bucket, MonthBucket};
use crate::config::SiteConfig;
use crate::log;
use crate::post::{JsonMap, Post};
use crate::utils::plural_count;

/// Display view of one post.
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub slug: &'a str,
    pub path: String,
    pub title: &'a str,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `March 15, 2023`
    pub display_date: String,
    pub summary: &'a str,
    pub tags: &'a [String],
    #[serde(flatten)]
    pub extra: &'a JsonMap,
}

impl<'a> From<&'a Post> for PostSummary<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            slug: &post.slug,
            path: post.path.to_string_lossy().replace('\\', "/"),
            title: post.title(),
            date: post.date.to_iso_date(),
            display_date: post.date.to_long_date(),
            summary: post.summary(),
            tags: &post.meta.tags,
            extra: &post.meta.extra,
        }
    }
}

/// The full grouped archive.
#[derive(Debug, Serialize)]
pub struct Archive<'a> {
    pub title: &'a str,
    pub total: usize,
    pub months: Vec<MonthBucket<PostSummary<'a>>>,
}

impl<'a> Archive<'a> {
    pub fn new(config: &'a SiteConfig, months: &'a [MonthBucket<Post>]) -> Self {
        let months: Vec<MonthBucket<PostSummary<'a>>> = months
            .iter()
            .map(|bucket| Bucket {
                key: bucket.key,
                entries: bucket.entries.iter().map(PostSummary::from).collect(),
            })
            .collect();

        Self {
            title: &config.site.title,
            total: months.iter().map(Bucket::len).sum(),
            months,
        }
    }
}

/// Serialize any value as JSON, pretty or compact.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Write `archive.json` into the output directory.
pub fn write_archive(config: &SiteConfig, archive: &Archive<'_>) -> Result<()> {
    let path = config.output_dir().join(&config.build.archive);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = to_json(archive, config.build.pretty)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;

    log!("archive"; "{} ({} in {})",
        config.root_relative(&path).display(),
        plural_count(archive.total, "post"),
        plural_count(archive.months.len(), "month"));
    Ok(())
}
