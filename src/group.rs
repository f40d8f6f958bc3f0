//! Test groups.
//!
//! A [`Group`] collects named tests and lifecycle hooks and runs them on a
//! [`TestHost`]:
//!
//! ```text
//! tags selected? ─no─> host.skip_group, done
//!      │yes
//! before_all
//! for each resolved test: before_each, host.run_test, after_each
//! after_all
//! ```
//!
//! Registration never fails on the spot. Problems are collected and reported
//! all at once by [`Group::run`], before any hook or test runs.

use std::{borrow::Cow, collections::HashSet, fmt};

use crate::{
    env::Environment,
    error::{ErrorList, GroupError, RegistrationError},
    filter::resolve_executable,
    host::TestHost,
    tags::{TagSet, should_skip_group},
    test::{TestEntry, TestFn, TestOptions},
};

type Hook<'g> = Box<dyn FnMut() + 'g>;

struct Lifecycle<'g> {
    before_all: Hook<'g>,
    before_each: Hook<'g>,
    after_each: Hook<'g>,
    after_all: Hook<'g>,
}

// Unset hooks are no-ops.
impl Default for Lifecycle<'_> {
    fn default() -> Self {
        Self {
            before_all: Box::new(|| ()),
            before_each: Box::new(|| ()),
            after_each: Box::new(|| ()),
            after_all: Box::new(|| ()),
        }
    }
}

/// Where a [`Group`] is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupState {
    /// Accepting tests and hooks.
    Building,
    /// [`Group::run`] is in progress, or a hook panicked out of it.
    Running,
    /// The run finished, possibly with an orchestration error.
    Completed,
    /// The tags did not match, nothing ran.
    Skipped,
    /// Registration errors were found, nothing ran.
    Invalid,
}

/// A named collection of tests sharing lifecycle hooks and tag gating.
///
/// Test functions and hooks may borrow anything that outlives `'g`, which
/// makes shared state between hooks and tests as simple as a [`Cell`](std::cell::Cell):
///
/// ```
/// use std::cell::Cell;
/// use testgroup::{Environment, Group, host::DefaultHost};
///
/// let setups = Cell::new(0);
/// let mut host = DefaultHost::default();
///
/// let mut group = Group::with_env(&mut host, "math", Environment::new());
/// group.before_each(|| setups.set(setups.get() + 1));
/// group
///     .test("adds", || assert_eq!(1 + 1, 2))
///     .test("subtracts", || assert_eq!(3 - 1, 2))
///     .run()
///     .unwrap();
/// drop(group);
///
/// assert_eq!(setups.get(), 2);
/// host.finish().assert_success();
/// ```
///
/// A group with registered tests must be run (or skipped by its tags) before
/// it is dropped, otherwise the host receives a [fatal](TestHost::fatal)
/// usage error.
pub struct Group<'g, H: TestHost + ?Sized> {
    host: &'g mut H,
    name: Cow<'static, str>,
    declared_tags: TagSet,
    environment: Environment,
    lifecycle: Lifecycle<'g>,
    registry: Vec<TestEntry<'g>>,
    names: HashSet<Cow<'static, str>>,
    errors: ErrorList<RegistrationError>,
    state: GroupState,
}

impl<'g, H: TestHost + ?Sized> Group<'g, H> {
    /// Create a group that reads its [`Environment`] from the process.
    pub fn new(host: &'g mut H, name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_env(host, name, Environment::from_env())
    }

    /// Create a group with an explicit [`Environment`].
    pub fn with_env(
        host: &'g mut H,
        name: impl Into<Cow<'static, str>>,
        environment: Environment,
    ) -> Self {
        Self {
            host,
            name: name.into(),
            declared_tags: TagSet::new(),
            environment,
            lifecycle: Lifecycle::default(),
            registry: Vec::new(),
            names: HashSet::new(),
            errors: ErrorList::new(),
            state: GroupState::Building,
        }
    }

    /// Require at least one of `tags` to be selected by the environment.
    ///
    /// A group without tags always runs unless the environment selects tags.
    pub fn with_tags(mut self, tags: impl Into<TagSet>) -> Self {
        self.declared_tags = tags.into();
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn state(&self) -> GroupState {
        self.state
    }

    pub fn is_skipped(&self) -> bool {
        self.state == GroupState::Skipped
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, GroupState::Completed | GroupState::Invalid)
    }

    pub fn declared_tags(&self) -> &TagSet {
        &self.declared_tags
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The registered tests in registration order.
    pub fn entries(&self) -> &[TestEntry<'g>] {
        &self.registry
    }

    /// Registration errors collected so far.
    pub fn errors(&self) -> &ErrorList<RegistrationError> {
        &self.errors
    }

    /// Register a test.
    pub fn test(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        function: impl TestFn + 'g,
    ) -> &mut Self {
        self.test_with(name, TestOptions::new(), function)
    }

    /// Register a test with [`TestOptions`].
    ///
    /// A name that is already taken records a
    /// [`DuplicateTestName`](RegistrationError::DuplicateTestName) error and
    /// keeps the first test. The error surfaces on [`run`](Self::run).
    pub fn test_with(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        options: impl Into<TestOptions>,
        function: impl TestFn + 'g,
    ) -> &mut Self {
        let name = name.into();
        if !self.accepts_registration("test") {
            return self;
        }

        if self.names.contains(&name) {
            tracing::debug!(group = %self.name, test = %name, "duplicate test name");
            self.errors.push(RegistrationError::DuplicateTestName {
                name: name.into_owned(),
            });
            return self;
        }

        self.names.insert(name.clone());
        self.registry
            .push(TestEntry::new(name, function, options.into()));
        self
    }

    /// Run `f` once before the first test.
    pub fn before_all(&mut self, f: impl FnMut() + 'g) -> &mut Self {
        if self.accepts_registration("before_all") {
            self.lifecycle.before_all = Box::new(f);
        }
        self
    }

    /// Run `f` before every test.
    pub fn before_each(&mut self, f: impl FnMut() + 'g) -> &mut Self {
        if self.accepts_registration("before_each") {
            self.lifecycle.before_each = Box::new(f);
        }
        self
    }

    /// Run `f` after every test.
    pub fn after_each(&mut self, f: impl FnMut() + 'g) -> &mut Self {
        if self.accepts_registration("after_each") {
            self.lifecycle.after_each = Box::new(f);
        }
        self
    }

    /// Run `f` once after the last test.
    pub fn after_all(&mut self, f: impl FnMut() + 'g) -> &mut Self {
        if self.accepts_registration("after_all") {
            self.lifecycle.after_all = Box::new(f);
        }
        self
    }

    fn accepts_registration(&self, what: &'static str) -> bool {
        if self.state == GroupState::Building {
            return true;
        }

        tracing::warn!(
            group = %self.name,
            state = ?self.state,
            what,
            "registration after the group left the building state is ignored"
        );
        false
    }

    /// Run all tests of the group.
    ///
    /// Returns an error for problems with the orchestration itself:
    /// registration errors, `only` tests in a CI environment or a second
    /// call. Whether single tests passed is reported to the host and never
    /// shows up here. A group skipped by its tags is `Ok`.
    ///
    /// `before_all` runs before `only` tests are checked against the CI flag,
    /// so it also runs when that check fails. `after_all` does not run in
    /// that case.
    ///
    /// A panicking hook unwinds out of `run` and leaves the group
    /// [`Running`](GroupState::Running). Such a group is never run again and
    /// is not reported as unrun on drop.
    pub fn run(&mut self) -> Result<(), GroupError> {
        let _span = tracing::debug_span!("group", name = %self.name).entered();

        if self.state != GroupState::Building {
            tracing::warn!(state = ?self.state, "group already finished");
            return Err(GroupError::AlreadyFinished {
                group: self.name.to_string(),
            });
        }

        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "registration errors, not running");
            self.state = GroupState::Invalid;
            return Err(GroupError::Registration(self.errors.clone()));
        }

        if should_skip_group(&self.declared_tags, &self.environment.tags) {
            tracing::debug!("tags not selected, skipping group");
            self.state = GroupState::Skipped;
            let reason = format!("skipping test group {}", self.name);
            self.host.skip_group(&self.name, &reason);
            return Ok(());
        }

        self.state = GroupState::Running;
        tracing::trace!("before_all");
        (self.lifecycle.before_all)();

        let tests = match resolve_executable(&self.registry, self.environment.ci) {
            Ok(tests) => tests,
            Err(source) => {
                self.state = GroupState::Completed;
                return Err(GroupError::Filter {
                    group: self.name.to_string(),
                    source,
                });
            }
        };

        for test in tests {
            tracing::trace!(test = test.name(), "before_each");
            (self.lifecycle.before_each)();
            self.host.run_test(&self.name, test.name(), test.function());
            tracing::trace!(test = test.name(), "after_each");
            (self.lifecycle.after_each)();
        }

        tracing::trace!("after_all");
        (self.lifecycle.after_all)();

        self.state = GroupState::Completed;
        tracing::debug!("group completed");
        Ok(())
    }
}

impl<H: TestHost + ?Sized> fmt::Debug for Group<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("declared_tags", &self.declared_tags)
            .field("environment", &self.environment)
            .field("registry", &self.registry)
            .field("errors", &self.errors)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<H: TestHost + ?Sized> Drop for Group<'_, H> {
    fn drop(&mut self) {
        if self.state != GroupState::Building
            || self.registry.is_empty()
            || std::thread::panicking()
        {
            return;
        }

        let message = format!(
            "test group \"{}\" did not run. Make sure you use the .run() method to execute test group",
            self.name
        );
        tracing::error!(group = %self.name, "{message}");
        self.host.fatal(&self.name, &message);
    }
}
