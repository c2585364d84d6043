//! Almanac - month-grouped archives for Markdown blogs.
//!
//! Posts are read from a content directory, filtered and sorted, then
//! grouped into one bucket per calendar month. The grouping itself lives in
//! [`archive`] and works on any dated item.

pub mod archive;
pub mod cli;
pub mod config;
pub mod content;
pub mod generator;
pub mod logger;
pub mod post;
pub mod utils;
