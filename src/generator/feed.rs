//! Atom 1.0 feed generation.
//!
//! Entries follow archive order, so the feed lists exactly what the index
//! page shows.

use std::fs;

use anyhow::{Context, Result, anyhow};
use atom_syndication::{
    Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime, GeneratorBuilder, Link, LinkBuilder,
    Person, PersonBuilder, Text,
};

use crate::config::SiteConfig;
use crate::log;
use crate::post::Post;
use crate::utils::date::DateTimeUtc;

/// Render the feed XML for `posts`.
pub fn build_atom<'a>(
    config: &SiteConfig,
    posts: impl IntoIterator<Item = &'a Post>,
) -> Result<String> {
    let info = &config.site;
    let base_url = info
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("site.url is required to build the feed"))?
        .trim_end_matches('/');

    let posts: Vec<&Post> = posts.into_iter().collect();
    let entries = posts
        .iter()
        .map(|post| post_to_entry(post, base_url))
        .collect::<Result<Vec<Entry>>>()?;

    // Newest post, or the epoch for an empty feed
    let updated = posts
        .iter()
        .map(|p| p.date)
        .max()
        .unwrap_or(DateTimeUtc::from_ymd(1970, 1, 1));

    let author: Person = PersonBuilder::default()
        .name(info.author.clone())
        .email((!info.email.is_empty()).then(|| info.email.clone()))
        .build();

    let self_link: Link = LinkBuilder::default()
        .href(format!(
            "{}/{}",
            base_url,
            config.build.feed.path.to_string_lossy().replace('\\', "/")
        ))
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();

    let alternate_link: Link = LinkBuilder::default()
        .href(base_url.to_string())
        .rel("alternate".to_string())
        .build();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(info.title.clone()))
        .id(base_url)
        .updated(to_fixed(updated)?)
        .authors(vec![author])
        .links(vec![self_link, alternate_link])
        .subtitle((!info.description.is_empty()).then(|| Text::plain(info.description.clone())))
        .generator(Some(
            GeneratorBuilder::default()
                .value("almanac")
                .version(Some(env!("CARGO_PKG_VERSION").to_string()))
                .build(),
        ))
        .lang(Some(info.language.clone()))
        .entries(entries)
        .build();

    Ok(feed.to_string())
}

/// Write rendered feed XML into the output directory.
pub fn write_feed_xml(config: &SiteConfig, xml: &str) -> Result<()> {
    let path = config.output_dir().join(&config.build.feed.path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, xml).with_context(|| format!("failed to write {}", path.display()))?;

    log!("atom"; "{}", config.root_relative(&path).display());
    Ok(())
}

fn post_to_entry(post: &Post, base_url: &str) -> Result<Entry> {
    let link = format!("{}{}", base_url, post.slug);
    let date = to_fixed(post.date)?;

    let entry_link: Link = LinkBuilder::default()
        .href(&link)
        .rel("alternate".to_string())
        .build();

    Ok(EntryBuilder::default()
        .title(Text::plain(post.title().to_string()))
        .id(&link)
        .updated(date)
        .published(Some(date))
        .links(vec![entry_link])
        .summary(Some(Text::plain(post.summary().to_string())))
        .build())
}

fn to_fixed(date: DateTimeUtc) -> Result<FixedDateTime> {
    let rfc3339 = date.to_rfc3339();
    rfc3339
        .parse()
        .map_err(|e| anyhow!("cannot convert {} to a feed timestamp: {}", rfc3339, e))
}
