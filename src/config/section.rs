//! `[site]` and `[build]` configuration sections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigDiagnostics;

// ============================================================================
// [site]
// ============================================================================

/// Site metadata, used for the archive header and the Atom feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Author email.
    pub email: String,

    /// Site description.
    pub description: String,

    /// Site URL (e.g., "https://example.com/blog"). Required for feeds.
    pub url: Option<String>,

    /// Language code (e.g., "en").
    pub language: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}

impl SiteInfoConfig {
    /// Validate site configuration.
    ///
    /// # Checks
    /// - If `feed_enabled`, `url` must be set
    /// - `url` must be a valid URL with scheme (e.g., `https://example.com`)
    pub fn validate(&self, feed_enabled: bool, diag: &mut ConfigDiagnostics) {
        if feed_enabled && self.url.is_none() {
            diag.error_with_hint(
                "site.url",
                "build.feed.enable is true but site.url is not configured",
                "set site.url, e.g.: \"https://example.com\"",
            );
        }

        let Some(url_str) = &self.url else {
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        "site.url",
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        "site.url",
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    "site.url",
                    format!("invalid URL: {}", e),
                    "use format like https://example.com",
                );
            }
        }
    }
}

// ============================================================================
// [build]
// ============================================================================

/// Order posts are listed in before grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Desc,
    /// Oldest first.
    Asc,
    /// Keep discovery (path) order.
    None,
}

/// `[build.feed]` settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Generate an Atom feed.
    pub enable: bool,

    /// Feed path relative to the output directory.
    pub path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: false,
            path: "atom.xml".into(),
        }
    }
}

/// Build settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory holding Markdown posts, relative to the site root.
    pub content: PathBuf,

    /// Output directory, relative to the site root.
    pub output: PathBuf,

    /// Archive file name, relative to the output directory.
    pub archive: PathBuf,

    /// Posts carrying any of these tags are left out of the archive.
    pub exclude_tags: Vec<String>,

    /// Include posts marked `draft: true`.
    pub drafts: bool,

    /// Listing order before grouping.
    pub sort: SortOrder,

    /// Maximum number of posts listed, applied after sorting.
    pub limit: usize,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Atom feed settings.
    pub feed: FeedConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "posts".into(),
            output: "public".into(),
            archive: "archive.json".into(),
            exclude_tags: vec!["standalone".to_string()],
            drafts: false,
            sort: SortOrder::default(),
            limit: 1000,
            pretty: false,
            feed: FeedConfig::default(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.limit == 0 {
            diag.error_with_hint(
                "build.limit",
                "must be greater than 0",
                "remove the field to use the default of 1000",
            );
        }

        if self.archive.as_os_str().is_empty() || self.archive.is_absolute() {
            diag.error_with_hint(
                "build.archive",
                format!("'{}' is not a relative file path", self.archive.display()),
                "use a path like \"archive.json\"",
            );
        }

        if self.feed.enable
            && (self.feed.path.as_os_str().is_empty() || self.feed.path.is_absolute())
        {
            diag.error_with_hint(
                "build.feed.path",
                format!("'{}' is not a relative file path", self.feed.path.display()),
                "use a path like \"atom.xml\"",
            );
        }
    }
}
