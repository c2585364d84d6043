//! Archive building orchestration.
//!
//! Build pipeline phases:
//! - **Load** - Parse every post under the content directory
//! - **Select** - Drop drafts and excluded tags, sort, apply the limit
//! - **Group** - Bucket the listing by month
//! - **Write** - `archive.json`, then the Atom feed when enabled
//!
//! A failure while loading or rendering stops the build before anything
//! is written.

use crate::{
    archive::MonthBucket,
    config::SiteConfig,
    content, debug,
    generator::{
        archive::{Archive, write_archive},
        feed::{build_atom, write_feed_xml},
    },
    log,
    post::Post,
    utils::plural_count,
};
use anyhow::Result;

/// Counts from a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub months: usize,
}

/// Load, select and group posts.
///
/// Shared by `build` and `query`, so both see the same listing.
pub fn collect_months(config: &SiteConfig) -> Result<Vec<MonthBucket<Post>>> {
    let loaded = content::load_posts(config)?;
    let selection = content::select(loaded, &config.build);

    log!("build"; "found {}", plural_count(selection.total(), "post"));
    if selection.drafts > 0 {
        log!("build"; "{} skipped", plural_count(selection.drafts, "draft"));
    }
    if selection.excluded > 0 {
        debug!("build"; "{} excluded by tag", plural_count(selection.excluded, "post"));
    }
    if selection.over_limit > 0 {
        log!("build"; "{} over the limit of {} left out",
            plural_count(selection.over_limit, "post"), config.build.limit);
    }

    let months = content::group_posts(selection.posts, config.build.sort)?;
    debug!("build"; "grouped into {}", plural_count(months.len(), "month"));
    Ok(months)
}

/// Build the archive (and feed) for the configured site.
///
/// Everything is rendered before the first file is written.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let months = collect_months(config)?;

    let archive = Archive::new(config, &months);
    let feed = if config.build.feed.enable {
        Some(build_atom(config, months.iter().flat_map(|b| b.entries.iter()))?)
    } else {
        None
    };

    write_archive(config, &archive)?;
    if let Some(xml) = feed {
        write_feed_xml(config, &xml)?;
    }

    Ok(BuildReport {
        posts: archive.total,
        months: months.len(),
    })
}
