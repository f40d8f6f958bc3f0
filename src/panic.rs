//! Turning a test execution into a [`TestStatus`].
//!
//! Tests signal failure by panicking or returning an error, and signal a skip
//! by unwinding with a [`SkipSignal`] (see [`skip`](crate::skip)). Hosts run
//! test functions through [`catch_test`] to get one status for all of these.

use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::{
    outcome::{TestFailure, TestStatus},
    test::{SkipSignal, TestFn},
};

/// Execute `test`, catching unwinds.
///
/// - returning normally maps the [`TestResult`](crate::test::TestResult)
/// - unwinding with a [`SkipSignal`] is [`TestStatus::Skipped`]
/// - any other panic is [`TestFailure::Panicked`]
pub fn catch_test(test: &dyn TestFn) -> TestStatus {
    match catch_unwind(AssertUnwindSafe(|| test.call_test())) {
        Ok(result) => result.into(),
        Err(payload) => match payload.downcast::<SkipSignal>() {
            Ok(signal) => TestStatus::Skipped {
                reason: signal.reason,
            },
            Err(payload) => TestStatus::Failed(TestFailure::Panicked(payload_as_string(payload))),
        },
    }
}

/// Convert a panic payload into a string.
///
/// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
/// Other payload types are formatted as a generic placeholder.
pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
    err.downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|err| err.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("Box<dyn Any>"))
}
