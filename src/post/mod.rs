//! Blog posts: frontmatter, excerpt and slug resolved from one Markdown file.

mod excerpt;
mod frontmatter;
mod meta;
mod slug;

pub use excerpt::{EXCERPT_LENGTH, excerpt};
pub use frontmatter::extract_frontmatter;
pub use meta::{JsonMap, PostMeta};
pub use slug::{normalize_slug, slug_from_path};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::archive::{Dated, InvalidDateError};
use crate::utils::date::DateTimeUtc;

/// A single post, ready for grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Source path relative to the content directory.
    pub path: PathBuf,
    /// URL path, e.g. `/hello-world/`.
    pub slug: String,
    /// Publication date, already validated.
    pub date: DateTimeUtc,
    pub meta: PostMeta,
    /// Plain-text body excerpt.
    pub excerpt: String,
}

impl Post {
    /// Read and parse a post from disk.
    pub fn load(file: &Path, content_dir: &Path) -> Result<Self> {
        let source = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let rel_path = file.strip_prefix(content_dir).unwrap_or(file);
        Self::parse(&source, rel_path)
    }

    /// Parse a post from its Markdown source.
    ///
    /// Fails when the date is missing or malformed: a post that cannot be
    /// placed in a month must stop the build, not disappear from the index.
    pub fn parse(source: &str, rel_path: &Path) -> Result<Self> {
        let (meta, body) = extract_frontmatter(source)
            .with_context(|| format!("invalid frontmatter in {}", rel_path.display()))?
            .unwrap_or((PostMeta::default(), source));

        let date = meta
            .date
            .as_deref()
            .ok_or(InvalidDateError::Missing)
            .and_then(DateTimeUtc::parse)
            .with_context(|| format!("invalid date in {}", rel_path.display()))?;

        let slug = match meta.slug.as_deref() {
            Some(slug) => normalize_slug(slug),
            None => slug_from_path(rel_path),
        };

        Ok(Self {
            path: rel_path.to_path_buf(),
            slug,
            date,
            excerpt: excerpt(body, EXCERPT_LENGTH),
            meta,
        })
    }

    /// Display title, falling back to the slug.
    pub fn title(&self) -> &str {
        match self.meta.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.slug,
        }
    }

    /// Display summary: the description if present, else the excerpt.
    pub fn summary(&self) -> &str {
        match self.meta.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => desc,
            _ => &self.excerpt,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }

    /// Whether the post carries any of `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.meta.tags.iter().any(|t| tags.contains(t))
    }
}

impl Dated for Post {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError> {
        Ok(self.date)
    }
}
