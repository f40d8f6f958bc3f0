use std::process::Termination;

use testgroup::prelude::*;

fn main() -> impl Termination {
    let mut host = DefaultHost::default();

    let mut skipping = Group::with_env(&mut host, "skipping", Environment::new());
    skipping
        .test("should equal 1", || assert_equal(1, 1))
        .test("should equal 2", || assert_equal(2, 2))
        .test_with("should skip this test", TestOptions::skip(), || {
            assert_equal(3, 3)
        })
        .test("skips itself", || -> TestResult {
            if cfg!(windows) {
                return Ok::<_, String>(()).into();
            }
            skip("only meaningful on windows")
        })
        .run()
        .unwrap();
    drop(skipping);

    // `only` is rejected when `CI` is set, so this group reads the real environment.
    let mut focused = Group::new(&mut host, "focused");
    focused
        .test("should equal 1", || assert_equal(1, 1))
        .test("should equal 2", || assert_equal(2, 2))
        .test_with("should only run this test", TestOptions::only(), || {
            assert_equal(3, 3)
        });
    if let Err(err) = focused.run() {
        eprintln!("{err}");
    }
    drop(focused);

    host.finish()
}
