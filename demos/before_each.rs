use std::{
    cell::{Cell, RefCell},
    process::Termination,
};

use testgroup::prelude::*;

#[derive(Debug, Default)]
struct User {
    name: String,
    age: u32,
}

fn main() -> impl Termination {
    let mut host = DefaultHost::default();

    let seed_age = Cell::new(1);
    let user = RefCell::new(User::default());
    let user = &user;

    // Every test sees a freshly seeded user, one year older than the last.
    let mut growing = Group::with_env(&mut host, "growing", Environment::new());
    growing.before_each(|| {
        seed_age.set(seed_age.get() + 1);
        *user.borrow_mut() = User {
            name: "John".into(),
            age: seed_age.get(),
        };
    });
    for expected in 2..=6u32 {
        growing.test(format!("user age should equal {expected}"), move || {
            assert_equal(expected, user.borrow().age)
        });
    }
    growing.run().unwrap();
    drop(growing);

    // Resetting the seed after each test gives every test the same user.
    seed_age.set(1);
    let mut reset = Group::with_env(&mut host, "reset", Environment::new());
    reset
        .before_each(|| {
            seed_age.set(seed_age.get() + 1);
            *user.borrow_mut() = User {
                name: "John".into(),
                age: seed_age.get(),
            };
        })
        .after_each(|| {
            seed_age.set(1);
            *user.borrow_mut() = User::default();
        });
    for run in ["first", "second", "third", "fourth", "fifth"] {
        reset.test(format!("user age should equal 2 on {run} run"), move || {
            assert_equal(2u32, user.borrow().age);
            assert_equal("John", user.borrow().name.as_str());
        });
    }
    reset.run().unwrap();
    drop(reset);

    host.finish()
}
