use std::{io, thread, time::Instant};

use crate::{
    formatter::{
        FmtErrors, FmtFatal, FmtGroupSkipped, FmtReport, FmtTestOutcome, FormatError,
        GroupFormatter, named_fmt, pretty::PrettyFormatter,
    },
    host::TestHost,
    outcome::{TestOutcome, TestStatus},
    panic::catch_test,
    report::{FatalError, RecordedOutcome, SkippedGroup, TestReport},
    test::TestFn,
};

/// The default [`TestHost`].
///
/// Runs every test in place on the calling thread, catching panics and skip
/// signals via [`catch_test`]. Each event is handed to the formatter and
/// recorded. [`finish`](Self::finish) returns everything as a [`TestReport`].
///
/// A fatal usage error panics by default, so a group that was never run fails
/// the `#[test]` that owns it. Use [`with_panic_on_fatal`](Self::with_panic_on_fatal)
/// to only record it.
#[derive(Debug)]
pub struct DefaultHost<Formatter: GroupFormatter = PrettyFormatter<io::Stdout>> {
    formatter: Formatter,
    panic_on_fatal: bool,
    started: Instant,
    outcomes: Vec<RecordedOutcome>,
    skipped_groups: Vec<SkippedGroup>,
    fatal: Vec<FatalError>,
    fmt_errors: Vec<(FormatError, Formatter::Error)>,
}

impl Default for DefaultHost<PrettyFormatter<io::Stdout>> {
    fn default() -> Self {
        Self::new(PrettyFormatter::default())
    }
}

impl<Formatter: GroupFormatter> DefaultHost<Formatter> {
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            panic_on_fatal: true,
            started: Instant::now(),
            outcomes: Vec::new(),
            skipped_groups: Vec::new(),
            fatal: Vec::new(),
            fmt_errors: Vec::new(),
        }
    }

    /// Replace the formatter.
    ///
    /// Formatting errors collected so far are dropped, so this is meant to be
    /// called before any group uses the host.
    pub fn with_formatter<WithFormatter: GroupFormatter>(
        self,
        formatter: WithFormatter,
    ) -> DefaultHost<WithFormatter> {
        DefaultHost {
            formatter,
            panic_on_fatal: self.panic_on_fatal,
            started: self.started,
            outcomes: self.outcomes,
            skipped_groups: self.skipped_groups,
            fatal: self.fatal,
            fmt_errors: Vec::new(),
        }
    }

    pub fn with_panic_on_fatal(self, panic_on_fatal: bool) -> Self {
        Self {
            panic_on_fatal,
            ..self
        }
    }

    /// The outcomes recorded so far.
    pub fn outcomes(&self) -> &[RecordedOutcome] {
        &self.outcomes
    }

    /// Format the summary and return the report.
    pub fn finish(self) -> TestReport<Formatter::Error> {
        let mut formatter = self.formatter;
        let mut fmt_errors = self.fmt_errors;
        let duration = self.started.elapsed();

        fmt_errors.push_on_error(named_fmt!(Report: formatter.fmt_report(FmtReport {
            outcomes: &self.outcomes,
            skipped_groups: self.skipped_groups.len(),
            fatal: self.fatal.len(),
            duration,
        })));

        TestReport {
            outcomes: self.outcomes,
            skipped_groups: self.skipped_groups,
            fatal: self.fatal,
            duration,
            fmt_errors,
        }
    }
}

impl<Formatter: GroupFormatter> TestHost for DefaultHost<Formatter> {
    fn run_test(&mut self, group: &str, name: &str, test: &dyn TestFn) -> TestStatus {
        let now = Instant::now();
        let status = catch_test(test);
        let outcome = TestOutcome {
            status: status.clone(),
            duration: now.elapsed(),
        };
        tracing::trace!(group, name, ?outcome, "test finished");

        self.fmt_errors.push_on_error(named_fmt!(
            TestOutcome: self.formatter.fmt_test_outcome(FmtTestOutcome {
                group,
                name,
                outcome: &outcome,
            })
        ));
        self.outcomes.push(RecordedOutcome {
            group: group.to_string(),
            name: name.to_string(),
            outcome,
        });

        status
    }

    fn skip_group(&mut self, group: &str, reason: &str) {
        self.fmt_errors.push_on_error(named_fmt!(
            GroupSkipped: self
                .formatter
                .fmt_group_skipped(FmtGroupSkipped { group, reason })
        ));
        self.skipped_groups.push(SkippedGroup {
            group: group.to_string(),
            reason: reason.to_string(),
        });
    }

    fn fatal(&mut self, group: &str, message: &str) {
        self.fmt_errors.push_on_error(named_fmt!(
            Fatal: self.formatter.fmt_fatal(FmtFatal { group, message })
        ));
        self.fatal.push(FatalError {
            group: group.to_string(),
            message: message.to_string(),
        });

        if self.panic_on_fatal && !thread::panicking() {
            panic!("{message}");
        }
    }
}
