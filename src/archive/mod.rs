//! Chronological grouping of posts into monthly buckets.
//!
//! The grouping is a stable partition, not a sort: buckets appear in the
//! order their keys are first seen, and entries keep their input order.
//!
//! ```text
//! 2023-03-15  ─┐
//! 2023-03-02  ─┴─▶ March 2023    [post1, post2]
//! 2023-01-20  ───▶ January 2023  [post3]
//! 2022-12-25  ───▶ December 2022 [post4]
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let buckets = group_by_month(&posts, InputOrder::Unsorted)?;
//! for bucket in &buckets {
//!     println!("{}: {}", bucket.key, bucket.entries.len());
//! }
//! ```

mod error;
mod month;

pub use error::InvalidDateError;
pub use month::{MONTH_NAMES, MonthKey, readable_month};

use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::utils::date::DateTimeUtc;

/// Anything that carries a publication date.
pub trait Dated {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError>;
}

impl Dated for DateTimeUtc {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError> {
        self.validate().map(|()| *self)
    }
}

impl Dated for str {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError> {
        DateTimeUtc::parse(self)
    }
}

impl Dated for String {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError> {
        DateTimeUtc::parse(self)
    }
}

impl<T: Dated> Dated for Option<T> {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError> {
        self.as_ref()
            .ok_or(InvalidDateError::Missing)
            .and_then(|date| date.published())
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn published(&self) -> Result<DateTimeUtc, InvalidDateError> {
        (**self).published()
    }
}

/// How the caller vouches for the input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputOrder {
    /// No guarantee. Every key is looked up among all earlier buckets.
    #[default]
    Unsorted,
    /// Input is sorted by date (ascending or descending), so equal keys are
    /// contiguous. Only the last bucket is checked; feeding unsorted input
    /// here yields duplicate keys.
    PreSorted,
}

/// Items sharing one key, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket<K, T> {
    pub key: K,
    pub entries: Vec<T>,
}

/// Posts published in one calendar month.
pub type MonthBucket<P> = Bucket<MonthKey, P>;

impl<K, T> Bucket<K, T> {
    fn new(key: K, first: T) -> Self {
        Self {
            key,
            entries: vec![first],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group `items` by the key `key_of` extracts.
///
/// The first extraction error aborts the whole grouping.
pub fn group_by<T, K, E, F>(
    items: impl IntoIterator<Item = T>,
    order: InputOrder,
    mut key_of: F,
) -> Result<Vec<Bucket<K, T>>, E>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Result<K, E>,
{
    let mut buckets: Vec<Bucket<K, T>> = Vec::new();
    // Key -> position in `buckets`; only maintained for unsorted input
    let mut positions: FxHashMap<K, usize> = FxHashMap::default();

    for item in items {
        let key = key_of(&item)?;

        if let Some(last) = buckets.last_mut()
            && last.key == key
        {
            last.entries.push(item);
            continue;
        }

        if order == InputOrder::Unsorted {
            if let Some(&pos) = positions.get(&key) {
                buckets[pos].entries.push(item);
                continue;
            }
            positions.insert(key.clone(), buckets.len());
        }

        buckets.push(Bucket::new(key, item));
    }

    Ok(buckets)
}

/// Group dated items into month buckets labelled like `"March 2023"`.
pub fn group_by_month<P: Dated>(
    posts: impl IntoIterator<Item = P>,
    order: InputOrder,
) -> Result<Vec<MonthBucket<P>>, InvalidDateError> {
    group_by(posts, order, |post| post.published().and_then(MonthKey::of))
}

/// Concatenate bucket entries back into one list, bucket by bucket.
pub fn flatten<K, T>(buckets: impl IntoIterator<Item = Bucket<K, T>>) -> Vec<T> {
    buckets.into_iter().flat_map(|b| b.entries).collect()
}
