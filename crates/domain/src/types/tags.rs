//! Customer tag sets
//!
//! The commerce platform stores tags as a single comma-separated string.
//! `TagSet` is the parsed form: entries are trimmed, empty entries dropped and
//! exact duplicates collapsed, while the original casing and first-seen order
//! are preserved so that a round-trip does not rewrite labels the merchant
//! typed by hand.

use std::collections::BTreeSet;
use std::fmt;

/// Ordered, duplicate-free set of customer tags.
#[derive(Debug, Clone, Default, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Parse a comma-separated tag string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for tag in raw.split(',') {
            set.insert(tag);
        }
        set
    }

    /// Parse an optional tag string; `None` yields an empty set.
    #[must_use]
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Insert a tag, returning `false` when it was blank or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Union of `self` and `other`; entries of `self` keep their position.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for tag in &other.tags {
            merged.insert(tag);
        }
        merged
    }

    /// Exact (case-sensitive) membership test.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Lowercased view used for membership evaluation.
    #[must_use]
    pub fn lowercased(&self) -> BTreeSet<String> {
        self.tags.iter().map(|tag| tag.to_lowercase()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Equality ignores ordering: two sets are equal when they hold the same tags.
impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|tag| other.contains(tag))
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(","))
    }
}
