use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use pretty_assertions::assert_eq;
use testgroup::{
    Environment, Group, GroupError, TestOptions,
    env::{CI_ENV_VAR, TAGS_ENV_VAR},
    formatter::{no::NoFormatter, pretty::PrettyFormatter},
    host::DefaultHost,
    skip,
    test::TestResult,
};

mod lib;
use lib::Buffer;

fn pretty_host(buffer: &Buffer) -> DefaultHost<PrettyFormatter<Buffer>> {
    DefaultHost::new(PrettyFormatter::default().with_target(buffer.clone()))
        .with_panic_on_fatal(false)
}

fn environment(vars: &[(&str, &str)]) -> Environment {
    let vars: HashMap<_, _> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Environment::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn full_run_output() {
    let buffer = Buffer::default();
    let mut host = pretty_host(&buffer);
    let connections = Cell::new(0);

    let mut group = Group::with_env(&mut host, "math", environment(&[]));
    group
        .before_all(|| connections.set(1))
        .after_all(|| connections.set(0));
    group
        .test("adds", || assert_eq!(1 + 1, 2))
        .test("connected", || assert_eq!(connections.get(), 1))
        .test_with("divides", TestOptions::skip(), || {
            if true {
                panic!("skipped tests never run")
            }
        })
        .test("parses", || "12".parse::<u32>().map(|_| ()))
        .test("breaks", || Err::<(), _>("broken"));
    group.run().unwrap();
    drop(group);

    assert_eq!(connections.get(), 0);

    let report = host.finish();
    assert_eq!(report.passed(), 3);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.skipped(), 1);
    assert!(!report.is_success());
    assert!(report.fmt_errors.is_empty());

    assert_eq!(
        buffer.sanitized(),
        "test math::adds ... ok\n\
         test math::connected ... ok\n\
         test math::divides ... skipped, skipping test divides\n\
         test math::parses ... ok\n\
         test math::breaks ... FAILED\n\
         \n\
         failures:\n\
         \n\
         ---- math::breaks ----\n\
         Error: \"broken\"\n\
         \n\
         test result: FAILED. 3 passed; 1 failed; 1 skipped; 0 groups skipped; finished in <duration>\n"
    );
}

#[test]
fn tags_from_the_environment_select_groups() {
    let buffer = Buffer::default();
    let mut host = pretty_host(&buffer);
    let env = environment(&[(TAGS_ENV_VAR, "unit")]);

    let mut unit = Group::with_env(&mut host, "unit", env.clone()).with_tags(["unit"]);
    unit.test("runs", || ());
    unit.run().unwrap();
    drop(unit);

    let mut integration =
        Group::with_env(&mut host, "integration", env.clone()).with_tags(["integration"]);
    integration.test("never", || if true { panic!("not selected") });
    integration.run().unwrap();
    assert!(integration.is_skipped());
    drop(integration);

    let mut untagged = Group::with_env(&mut host, "untagged", env);
    untagged.test("never", || if true { panic!("not selected") });
    untagged.run().unwrap();
    assert!(untagged.is_skipped());
    drop(untagged);

    let report = host.finish();
    assert!(report.is_success());
    assert_eq!(report.skipped_groups.len(), 2);
    assert_eq!(
        buffer.sanitized(),
        "test unit::runs ... ok\n\
         group integration ... skipped, skipping test group integration\n\
         group untagged ... skipped, skipping test group untagged\n\
         \n\
         test result: ok. 1 passed; 0 failed; 0 skipped; 2 groups skipped; finished in <duration>\n"
    );
}

#[test]
fn only_is_rejected_in_ci() {
    let mut host = DefaultHost::new(NoFormatter);
    let called = Cell::new(false);

    let mut group = Group::with_env(&mut host, "focused", environment(&[(CI_ENV_VAR, "true")]));
    group
        .test("a", || called.set(true))
        .test_with("b", TestOptions::only(), || called.set(true));
    let err = group.run().unwrap_err();
    drop(group);

    assert!(err.is_only_in_ci());
    assert!(!called.get());
    assert!(host.finish().outcomes.is_empty());
}

#[test]
fn only_narrows_the_run_outside_ci() {
    let mut host = DefaultHost::new(NoFormatter);
    let called = RefCell::new(Vec::new());

    let mut group = Group::with_env(&mut host, "focused", environment(&[(CI_ENV_VAR, "0")]));
    group
        .test("a", || called.borrow_mut().push("a"))
        .test_with("b", TestOptions::only(), || called.borrow_mut().push("b"))
        .test_with("c", TestOptions::only().with_skip(true), || {
            called.borrow_mut().push("c")
        });
    group.run().unwrap();
    drop(group);

    assert_eq!(*called.borrow(), ["b", "c"]);
    host.finish().assert_success();
}

#[test]
fn duplicates_are_reported_together() {
    let mut host = DefaultHost::new(NoFormatter);

    let mut group = Group::with_env(&mut host, "dupes", Environment::new());
    group
        .test("a", || ())
        .test("a", || ())
        .test("b", || ())
        .test("b", || ());

    let Err(GroupError::Registration(errors)) = group.run() else {
        panic!("expected registration errors");
    };
    drop(group);

    assert_eq!(
        errors.to_string(),
        "test already exists: a, test already exists: b, "
    );
    assert_eq!(errors.into_inner().len(), 2);
    assert!(host.finish().outcomes.is_empty());
}

#[test]
fn skip_inside_a_test() {
    let mut host = DefaultHost::new(NoFormatter);

    let mut group = Group::with_env(&mut host, "inner", Environment::new());
    group
        .test("platform", || -> TestResult {
            skip("only on linux");
        })
        .test("other", || ());
    group.run().unwrap();
    drop(group);

    let report = host.finish();
    assert!(report.is_success());
    assert!(report.outcome("inner", "platform").unwrap().skipped());
    assert!(report.outcome("inner", "other").unwrap().passed());
}

#[test]
fn forgotten_group_is_fatal() {
    let buffer = Buffer::default();
    let mut host = pretty_host(&buffer);

    let mut group = Group::with_env(&mut host, "forgotten", Environment::new());
    group.test("a", || ());
    drop(group);

    let report = host.finish();
    assert!(!report.is_success());
    assert_eq!(report.fatal.len(), 1);
    assert!(
        buffer.sanitized().starts_with(
            "error: forgotten: test group \"forgotten\" did not run. \
             Make sure you use the .run() method to execute test group\n"
        ),
        "{}",
        buffer.sanitized()
    );
}

#[test]
#[should_panic(expected = "did not run")]
fn forgotten_group_fails_the_owning_test() {
    let mut host = DefaultHost::new(NoFormatter);

    let mut group = Group::with_env(&mut host, "forgotten", Environment::new());
    group.test("a", || ());
}

#[test]
#[should_panic(expected = "grouped tests failed: failing::fails")]
fn failures_fail_the_owning_test() {
    let mut host = DefaultHost::new(NoFormatter);

    let mut group = Group::with_env(&mut host, "failing", Environment::new());
    group.test("fails", || assert_eq!(1 + 1, 3, "expected failure"));
    group.run().unwrap();
    drop(group);

    host.finish().assert_success();
}

#[test]
fn before_each_reseeds_every_test() {
    use testgroup::prelude::*;

    let seed = Cell::new(1u32);
    let age = Cell::new(0u32);
    let mut host = DefaultHost::new(NoFormatter);

    let mut group = Group::with_env(&mut host, "seeded", Environment::new());
    group.before_each(|| {
        seed.set(seed.get() + 1);
        age.set(seed.get());
    });
    for expected in 2..=6u32 {
        let age = &age;
        group.test(format!("age is {expected}"), move || {
            assert_equal(expected, age.get())
        });
    }
    group.test("age is 99", || assert_equal(99u32, age.get()));
    group.run().unwrap();
    drop(group);

    let report = host.finish();
    assert_eq!(report.passed(), 5);
    assert_eq!(report.failed(), 1);
    let failed = report.outcome("seeded", "age is 99").unwrap();
    assert!(failed.failed());
    assert!(matches!(
        &failed.status,
        testgroup::outcome::TestStatus::Failed(testgroup::outcome::TestFailure::Panicked(msg))
            if msg.as_str() == "\nExpected:\n+\t99\n\nGot:\n-\t7\n"
    ));
}
