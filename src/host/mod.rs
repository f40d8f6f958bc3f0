//! The test runner a group delegates to.
//!
//! A [`Group`](crate::group::Group) decides *which* tests run and *when* the
//! lifecycle hooks are called. Actually executing a test and reporting its
//! result is the host's job. This keeps groups usable on top of any test
//! runner: the built in `#[test]` harness, a custom harness or a recording
//! double in tests.
//!
//! Implement [`TestHost`] to plug a group into another runner.
//! [`DefaultHost`] runs tests in place and collects a
//! [`TestReport`](crate::report::TestReport).

use crate::{outcome::TestStatus, test::TestFn};

mod default;
pub use default::*;

/// The capabilities a group needs from the underlying test runner.
pub trait TestHost {
    /// Execute the named test and report its result.
    ///
    /// `test` may unwind with a [`SkipSignal`](crate::test::SkipSignal), which
    /// should be reported as skipped rather than failed.
    /// [`catch_test`](crate::panic::catch_test) does exactly that.
    fn run_test(&mut self, group: &str, name: &str, test: &dyn TestFn) -> TestStatus;

    /// Mark the whole group as skipped.
    fn skip_group(&mut self, group: &str, reason: &str);

    /// Report a usage error of a group.
    ///
    /// Called when a group with registered tests goes out of scope without
    /// being run. Never called while the thread is already panicking.
    fn fatal(&mut self, group: &str, message: &str);
}

impl<H: TestHost + ?Sized> TestHost for &mut H {
    fn run_test(&mut self, group: &str, name: &str, test: &dyn TestFn) -> TestStatus {
        (**self).run_test(group, name, test)
    }

    fn skip_group(&mut self, group: &str, reason: &str) {
        (**self).skip_group(group, reason)
    }

    fn fatal(&mut self, group: &str, message: &str) {
        (**self).fatal(group, message)
    }
}
