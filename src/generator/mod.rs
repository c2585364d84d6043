//! Output generators.
//!
//! - `archive` - month-grouped `archive.json`
//! - `feed` - Atom feed over the same listing

pub mod archive;
pub mod feed;
