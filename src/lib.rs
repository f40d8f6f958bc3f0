//! Grouped tests on top of any test runner.
//!
//! A [`Group`] adds what a flat list of tests lacks:
//! - lifecycle hooks that run before/after all tests and before/after each test
//! - tags that activate a group only when the environment selects them
//! - per test `skip` and `only` modifiers, with `only` rejected in CI
//! - duplicate name detection, reported together when the group runs
//!
//! Executing a single test is delegated to a [`TestHost`](host::TestHost).
//! [`DefaultHost`](host::DefaultHost) runs tests in place, prints libtest like
//! output and collects a [`TestReport`](report::TestReport).
//!
//! Most uses only need the [`prelude`].

pub mod assert;
pub mod env;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod group;
pub mod host;
pub mod outcome;
pub mod panic;
pub mod report;
pub mod tags;

pub use env::Environment;
pub use error::{ErrorList, GroupError, RegistrationError};
pub use group::{Group, GroupState};
pub use tags::TagSet;
pub use test::{TestOptions, skip};

pub mod prelude {
    pub use crate::{
        Environment, Group, TestOptions,
        assert::{assert_equal, assert_err, assert_false, assert_none, assert_ok, assert_true},
        host::{DefaultHost, TestHost},
        report::TestReport,
        skip,
        test::TestResult,
    };
}

#[cfg(test)]
mod test_support;
