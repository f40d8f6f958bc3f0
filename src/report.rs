use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{formatter::FormatError, outcome::TestOutcome};

/// The outcome of one test, together with the group it ran in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOutcome {
    pub group: String,
    pub name: String,
    pub outcome: TestOutcome,
}

/// A group that was skipped because its tags were not selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    pub group: String,
    pub reason: String,
}

/// A usage error reported by a group, like a group that never ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    pub group: String,
    pub message: String,
}

/// Everything a [`DefaultHost`](crate::host::DefaultHost) saw.
#[derive(Debug)]
#[non_exhaustive]
pub struct TestReport<FmtError> {
    pub outcomes: Vec<RecordedOutcome>,
    pub skipped_groups: Vec<SkippedGroup>,
    pub fatal: Vec<FatalError>,
    pub duration: Duration,
    pub fmt_errors: Vec<(FormatError, FmtError)>,
}

impl<FmtError> TestReport<FmtError> {
    pub fn passed(&self) -> usize {
        self.count(TestOutcome::passed)
    }

    pub fn failed(&self) -> usize {
        self.count(TestOutcome::failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(TestOutcome::skipped)
    }

    fn count(&self, predicate: impl Fn(&TestOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|recorded| predicate(&recorded.outcome))
            .count()
    }

    /// Look up the outcome of `name` in `group`.
    pub fn outcome(&self, group: &str, name: &str) -> Option<&TestOutcome> {
        self.outcomes
            .iter()
            .find(|recorded| recorded.group == group && recorded.name == name)
            .map(|recorded| &recorded.outcome)
    }

    /// No test failed and no group reported a usage error.
    pub fn is_success(&self) -> bool {
        self.fatal.is_empty() && self.outcomes.iter().all(|recorded| recorded.outcome.is_good())
    }

    /// Panic with a summary unless [`is_success`](Self::is_success).
    ///
    /// Meant as the last line of a `#[test]` that drives groups, so failing
    /// grouped tests fail the surrounding test.
    #[track_caller]
    pub fn assert_success(&self) {
        if self.is_success() {
            return;
        }

        let failed: Vec<_> = self
            .outcomes
            .iter()
            .filter(|recorded| recorded.outcome.is_bad())
            .map(|recorded| format!("{}::{}", recorded.group, recorded.name))
            .chain(self.fatal.iter().map(|fatal| fatal.message.clone()))
            .collect();
        panic!("grouped tests failed: {}", failed.join(", "));
    }
}

impl<FmtError> Termination for TestReport<FmtError> {
    fn report(self) -> ExitCode {
        match self.is_success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}
