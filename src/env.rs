//! Environment driven configuration.
//!
//! Two values come from the environment: the selected tags and whether we
//! run in a CI pipeline. [`Environment::from_env`] reads both from the process
//! environment, [`Environment::from_lookup`] reads them from any lookup
//! function. Groups get an [`Environment`] handed in, they never read the
//! process environment on their own while running.

use std::env;

use crate::tags::TagSet;

/// Comma separated list of tags selecting which groups run.
pub const TAGS_ENV_VAR: &str = "TESTGROUP_TAGS";

/// Set by CI providers like GitHub Actions.
pub const CI_ENV_VAR: &str = "CI";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Tags selected for this run, empty means no selection.
    pub tags: TagSet,

    /// Whether we run in a continuous integration environment.
    pub ci: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the environment of the current process.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the environment through `lookup`.
    ///
    /// Unset and unreadable variables are both `None`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tags = lookup(TAGS_ENV_VAR)
            .map(|list| TagSet::parse(&list))
            .unwrap_or_default();
        let ci = lookup(CI_ENV_VAR).as_deref().is_some_and(parse_flag);

        let env = Self { tags, ci };
        tracing::debug!(tags = %env.tags, ci = env.ci, "read test environment");
        env
    }

    pub fn with_tags(self, tags: impl Into<TagSet>) -> Self {
        Self {
            tags: tags.into(),
            ..self
        }
    }

    pub fn with_ci(self, ci: bool) -> Self {
        Self { ci, ..self }
    }
}

// Anything not clearly truthy counts as unset.
fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}
