//! Tag based activation of test groups.
//!
//! A group may declare tags. The environment may select tags. The group only
//! runs when both sides agree, see [`should_skip_group`].

use std::{borrow::Borrow, collections::BTreeSet, fmt};

/// A set of tags.
///
/// Tags are compared by exact string equality: no case folding, no partial
/// matches and no wildcards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated list like `"unit, integration"`.
    ///
    /// Items are trimmed and empty items are dropped, so `""` and `" , "`
    /// both yield an empty set.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether at least one tag is in both sets.
    pub fn intersects(&self, other: &TagSet) -> bool {
        self.0.intersection(&other.0).next().is_some()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Borrow<str>, const N: usize> From<[S; N]> for TagSet {
    fn from(tags: [S; N]) -> Self {
        tags.iter().map(|tag| tag.borrow().to_string()).collect()
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags = self.iter();
        if let Some(first) = tags.next() {
            f.write_str(first)?;
        }
        for tag in tags {
            write!(f, ",{tag}")?;
        }
        Ok(())
    }
}

/// Decide whether a group with `declared` tags is skipped when the
/// environment selected `active` tags.
///
/// | declared  | active    | result                        |
/// |-----------|-----------|-------------------------------|
/// | empty     | empty     | run                           |
/// | non-empty | empty     | skip                          |
/// | any       | non-empty | run if the sets intersect     |
///
/// The last row means that an untagged group is skipped as soon as the
/// environment asks for specific tags.
pub fn should_skip_group(declared: &TagSet, active: &TagSet) -> bool {
    let skip = match (declared.is_empty(), active.is_empty()) {
        (true, true) => false,
        (false, true) => true,
        (_, false) => !declared.intersects(active),
    };

    tracing::debug!(%declared, %active, skip, "tag filter decision");
    skip
}
