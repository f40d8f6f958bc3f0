//! Error types for test groups.
//!
//! Registration problems are not reported when they happen. A group collects
//! them into an [`ErrorList`] and surfaces all of them together when
//! [`Group::run`](crate::group::Group::run) is called. Problems found while
//! running (like an `only` test in CI) are reported right away as a
//! [`GroupError`].

use std::{collections::VecDeque, error::Error, fmt};

use crate::filter::FilterError;

/// An ordered list of errors that is reported as a single error.
///
/// Errors are kept in insertion order and never deduplicated.
/// [`pop`](Self::pop) removes from the front, so the list behaves like a
/// FIFO queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList<E> {
    errors: VecDeque<E>,
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        Self {
            errors: VecDeque::new(),
        }
    }
}

impl<E> ErrorList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: E) {
        self.errors.push_back(err);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Remove and return the earliest error, `None` if the list is empty.
    pub fn pop(&mut self) -> Option<E> {
        self.errors.pop_front()
    }

    /// All contained errors, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &E> {
        self.errors.iter()
    }

    /// Unwrap the list into its causes, oldest first.
    pub fn into_inner(self) -> Vec<E> {
        self.errors.into()
    }
}

impl<E> FromIterator<E> for ErrorList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl<E> IntoIterator for ErrorList<E> {
    type Item = E;
    type IntoIter = std::collections::vec_deque::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<E> Extend<E> for ErrorList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

// Every message is followed by the separator, including the last one.
impl<E: fmt::Display> fmt::Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in self.errors.iter() {
            write!(f, "{err}, ")?;
        }
        Ok(())
    }
}

impl<E: Error + 'static> Error for ErrorList<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors.front().map(|err| err as &(dyn Error + 'static))
    }
}

/// A problem detected while registering a test.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error("test already exists: {name}")]
    DuplicateTestName { name: String },
}

/// An orchestration failure returned by [`Group::run`](crate::group::Group::run).
///
/// Assertion failures of single tests are never reported here, those are
/// the host's business.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GroupError {
    /// The group collected registration errors and did not run any test.
    #[error("{0}")]
    Registration(ErrorList<RegistrationError>),

    /// Resolving the executable tests failed.
    #[error("test group \"{group}\" error: {source}")]
    Filter {
        group: String,
        #[source]
        source: FilterError,
    },

    /// The group already ran or was skipped.
    #[error("test group \"{group}\" has already been run")]
    AlreadyFinished { group: String },
}

impl GroupError {
    /// Whether this error comes from an `only` test in a CI environment.
    pub fn is_only_in_ci(&self) -> bool {
        matches!(
            self,
            GroupError::Filter {
                source: FilterError::OnlyNotAllowedInCi,
                ..
            }
        )
    }
}
