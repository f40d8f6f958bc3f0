//! Resolving which registered tests actually run.
//!
//! Filtering works on the whole registry at once:
//! - if any test is marked `only`, exactly those tests run
//! - otherwise every test runs, but tests marked `skip` are replaced by a
//!   stand-in that reports "skipped" without calling the test function
//!
//! An `only` test in a CI environment is an error, since it would silently
//! narrow the automated test coverage.

use std::borrow::Cow;

use crate::test::{TestEntry, TestFn, TestResult, skip};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FilterError {
    #[error("test option 'only' not allowed in CI environment")]
    OnlyNotAllowedInCi,
}

/// A test that survived filtering.
#[derive(Debug, Clone, Copy)]
pub struct ExecutableTest<'e, 'g> {
    entry: &'e TestEntry<'g>,
    skipped: bool,
}

impl<'e, 'g> ExecutableTest<'e, 'g> {
    pub fn run(entry: &'e TestEntry<'g>) -> Self {
        Self {
            entry,
            skipped: false,
        }
    }

    /// A stand-in for `entry` that never calls its function.
    pub fn skipped(entry: &'e TestEntry<'g>) -> Self {
        Self {
            entry,
            skipped: true,
        }
    }

    pub fn name(&self) -> &'e str {
        self.entry.name()
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// The function a host should execute for this test.
    pub fn function(&self) -> &dyn TestFn {
        match self.skipped {
            true => self,
            false => self.entry.function(),
        }
    }
}

// The stand-in body of a skipped test.
impl TestFn for ExecutableTest<'_, '_> {
    fn call_test(&self) -> TestResult {
        skip(Cow::Owned(format!("skipping test {}", self.name())))
    }
}

/// Resolve the tests to execute, in registry order.
///
/// Fails only when an `only` test exists and `ci` is set.
pub fn resolve_executable<'e, 'g>(
    entries: &'e [TestEntry<'g>],
    ci: bool,
) -> Result<Vec<ExecutableTest<'e, 'g>>, FilterError> {
    let only = resolve_only(entries, ci)?;
    if !only.is_empty() {
        tracing::debug!(count = only.len(), "running only tests marked as only");
        return Ok(only);
    }

    let executable: Vec<_> = entries
        .iter()
        .map(|entry| match entry.options().skip {
            true => ExecutableTest::skipped(entry),
            false => ExecutableTest::run(entry),
        })
        .collect();

    tracing::debug!(
        count = executable.len(),
        skipped = executable.iter().filter(|test| test.is_skipped()).count(),
        "resolved executable tests"
    );
    Ok(executable)
}

fn resolve_only<'e, 'g>(
    entries: &'e [TestEntry<'g>],
    ci: bool,
) -> Result<Vec<ExecutableTest<'e, 'g>>, FilterError> {
    let mut only = Vec::new();
    for entry in entries.iter().filter(|entry| entry.options().only) {
        if ci {
            return Err(FilterError::OnlyNotAllowedInCi);
        }
        only.push(ExecutableTest::run(entry));
    }
    Ok(only)
}
