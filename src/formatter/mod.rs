//! Output formatting for [`DefaultHost`](crate::host::DefaultHost).
//!
//! The host emits one event per test outcome, per skipped group, per fatal
//! usage error and one final event for the whole report. A formatter turns
//! these events into output. Formatting errors never abort a run, the host
//! collects them into the [`TestReport`](crate::report::TestReport) instead.
//!
//! Implement [`GroupFormatter`] to define a custom output format.

use std::time::Duration;

use crate::outcome::TestOutcome;

pub mod no;
pub mod pretty;

/// Names the formatter call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatError {
    TestOutcome,
    GroupSkipped,
    Fatal,
    Report,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtTestOutcome<'o> {
    pub group: &'o str,
    pub name: &'o str,
    pub outcome: &'o TestOutcome,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtGroupSkipped<'o> {
    pub group: &'o str,
    pub reason: &'o str,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtFatal<'o> {
    pub group: &'o str,
    pub message: &'o str,
}

#[derive(Debug, Clone, Copy)]
pub struct FmtReport<'o> {
    pub outcomes: &'o [crate::report::RecordedOutcome],
    pub skipped_groups: usize,
    pub fatal: usize,
    pub duration: Duration,
}

/// A strategy for rendering host events.
///
/// Every method defaults to doing nothing, so formatters only implement the
/// events they care about.
pub trait GroupFormatter {
    type Error;

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_group_skipped(&mut self, data: FmtGroupSkipped<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_fatal(&mut self, data: FmtFatal<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_report(&mut self, data: FmtReport<'_>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, named: (FormatError, Result<(), E>));
}

impl<E> FmtErrors<E> for Vec<(FormatError, E)> {
    fn push_on_error(&mut self, (name, result): (FormatError, Result<(), E>)) {
        if let Err(err) = result {
            self.push((name, err));
        }
    }
}

macro_rules! named_fmt {
    ($name:ident: $call:expr) => {
        ($crate::formatter::FormatError::$name, $call)
    };
}

pub(crate) use named_fmt;
