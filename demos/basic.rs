use std::process::Termination;

use testgroup::prelude::*;

fn main() -> impl Termination {
    let mut host = DefaultHost::default();
    // Same as running with `TESTGROUP_TAGS=unit`.
    let env = Environment::new().with_tags(["unit"]);

    let mut unit = Group::with_env(&mut host, "unit", env.clone()).with_tags(["unit"]);
    unit.test("should pass", || assert_true(true))
        .test("parses", || "42".parse::<u32>().map(|_| ()))
        .run()
        .unwrap();
    drop(unit);

    let mut e2e = Group::with_env(&mut host, "e2e", env).with_tags(["e2e"]);
    e2e.test("should not run", || -> TestResult {
        panic!("e2e tests are not selected")
    })
    .run()
    .unwrap();
    drop(e2e);

    host.finish()
}
