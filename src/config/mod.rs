//! Site configuration management for `almanac.toml`.
//!
//! # Sections
//!
//! | Section         | Purpose                                          |
//! |-----------------|--------------------------------------------------|
//! | `[site]`        | Site metadata (title, author, url, language)     |
//! | `[build]`       | Content/output paths, filtering, sort, limit     |
//! | `[build.feed]`  | Atom feed toggle and path                        |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Notes"
//! url = "https://example.com"
//!
//! [build]
//! content = "posts"
//! exclude_tags = ["standalone"]
//!
//! [build.feed]
//! enable = true
//! ```

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{BuildConfig, FeedConfig, SiteInfoConfig, SortOrder};

use util::{find_config_file, resolve_path};

use crate::{
    cli::{Cli, Commands, SourceArgs},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "almanac.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing almanac.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// are used and the project root is cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let required = cli.config != Path::new(DEFAULT_CONFIG_NAME);
        let mut config = Self::discover(&cwd, &cli.config, required)?;
        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Find and parse the config file starting at `start`, without validation.
    ///
    /// A missing file falls back to defaults unless `required` is set.
    pub fn discover(start: &Path, config_name: &Path, required: bool) -> Result<Self> {
        match find_config_file(start, config_name) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config.root = root;
                Ok(config)
            }
            None if required => Err(ConfigError::NotFound(config_name.to_path_buf()).into()),
            None => {
                log!("config"; "{} not found, using defaults", config_name.display());
                Ok(Self {
                    root: start.to_path_buf(),
                    ..Self::default()
                })
            }
        }
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply CLI overrides on top of file values.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { args } => {
                self.apply_source_args(&args.source);
                if let Some(output) = &args.output {
                    self.build.output = output.clone();
                }
                if let Some(feed) = args.feed {
                    self.build.feed.enable = feed;
                }
            }
            Commands::Query { args } => {
                self.apply_source_args(&args.source);
                if args.pretty {
                    self.build.pretty = true;
                }
            }
        }
    }

    /// Apply the content options shared by every subcommand.
    pub fn apply_source_args(&mut self, args: &SourceArgs) {
        if let Some(content) = &args.content {
            self.build.content = content.clone();
        }
        if args.drafts {
            self.build.drafts = true;
        }
        crate::logger::set_verbose(args.verbose);
    }

    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(self.build.feed.enable, &mut diag);
        self.build.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Absolute content directory.
    pub fn content_dir(&self) -> PathBuf {
        resolve_path(&self.root, &self.build.content)
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        resolve_path(&self.root, &self.build.output)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_full() {
        let config = SiteConfig::from_str(
            r#"
            [site]
            title = "Notes"
            author = "Nik"
            url = "https://example.com"

            [build]
            content = "content/posts"
            exclude_tags = ["standalone", "private"]
            sort = "asc"
            limit = 20

            [build.feed]
            enable = true
            path = "feeds/atom.xml"
            "#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.build.content, PathBuf::from("content/posts"));
        assert_eq!(config.build.exclude_tags, vec!["standalone", "private"]);
        assert_eq!(config.build.sort, SortOrder::Asc);
        assert_eq!(config.build.limit, 20);
        assert!(config.build.feed.enable);
        assert_eq!(config.build.feed.path, PathBuf::from("feeds/atom.xml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_str_empty_uses_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.build, BuildConfig::default());
        assert_eq!(config.site, SiteInfoConfig::default());
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let err = SiteConfig::from_str("[site\ntitle = \"x\"").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_parse_with_ignored_reports_unknown() {
        let (config, ignored) =
            SiteConfig::parse_with_ignored("[site]\ntitle = \"x\"\ncolour = \"red\"\n").unwrap();
        assert_eq!(config.site.title, "x");
        assert_eq!(ignored, vec!["site.colour"]);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = SiteConfig::default();
        config.build.limit = 0;
        config.build.feed.enable = true;

        let err = config.validate().unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(diag)) => assert_eq!(diag.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_discover_sets_root() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("almanac.toml"),
            "[build]\ncontent = \"writing\"\n",
        )
        .unwrap();
        let nested = dir.path().join("writing");
        fs::create_dir_all(&nested).unwrap();

        let config = SiteConfig::discover(&nested, Path::new("almanac.toml"), false).unwrap();
        assert_eq!(config.get_root(), dir.path());
        assert_eq!(config.content_dir(), dir.path().join("writing"));
        assert_eq!(config.output_dir(), dir.path().join("public"));
    }

    #[test]
    fn test_discover_without_file() {
        let dir = TempDir::new().unwrap();
        let config =
            SiteConfig::discover(dir.path(), Path::new(DEFAULT_CONFIG_NAME), false).unwrap();
        assert_eq!(config.get_root(), dir.path());
        assert!(config.config_path.as_os_str().is_empty());
        assert_eq!(config.content_dir(), dir.path().join("posts"));
    }

    #[test]
    fn test_discover_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::discover(dir.path(), Path::new("other.toml"), true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(path)) if path == Path::new("other.toml")
        ));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "almanac", "build", "-c", "drafts-dir", "-o", "dist", "--drafts", "--feed",
        ]);
        let mut config = SiteConfig::default();
        config.apply_command_options(&cli);

        assert_eq!(config.build.content, PathBuf::from("drafts-dir"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.drafts);
        assert!(config.build.feed.enable);
    }

    #[test]
    fn test_query_pretty_override() {
        let cli = Cli::parse_from(["almanac", "query", "--pretty"]);
        let mut config = SiteConfig::default();
        config.apply_command_options(&cli);
        assert!(config.build.pretty);
    }

    #[test]
    fn test_root_relative() {
        let config = SiteConfig {
            root: PathBuf::from("/site"),
            ..Default::default()
        };
        assert_eq!(
            config.root_relative("/site/public/archive.json"),
            PathBuf::from("public/archive.json")
        );
        assert_eq!(config.root_relative("/other"), PathBuf::from("/other"));
    }
}
