use std::{
    cell::{Cell, RefCell},
    io::{self, Write},
    rc::Rc,
};

use crate::{
    env::Environment,
    formatter::pretty::SupportsColor,
    group::Group,
    host::TestHost,
    outcome::TestStatus,
    panic::catch_test,
    test::TestFn,
};

/// A non-CI environment without selected tags.
pub fn env() -> Environment {
    Environment::new()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Run { name: String, status: TestStatus },
    GroupSkipped { group: String, reason: String },
    Fatal { group: String, message: String },
}

/// A [`TestHost`] that records everything and never panics on its own.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn run_names(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Run { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn status(&self, name: &str) -> &TestStatus {
        self.events
            .iter()
            .find_map(|event| match event {
                HostEvent::Run { name: n, status } if n == name => Some(status),
                _ => None,
            })
            .unwrap_or_else(|| panic!("test {name} did not run"))
    }
}

impl TestHost for RecordingHost {
    fn run_test(&mut self, _: &str, name: &str, test: &dyn TestFn) -> TestStatus {
        let status = catch_test(test);
        self.events.push(HostEvent::Run {
            name: name.to_string(),
            status: status.clone(),
        });
        status
    }

    fn skip_group(&mut self, group: &str, reason: &str) {
        self.events.push(HostEvent::GroupSkipped {
            group: group.to_string(),
            reason: reason.to_string(),
        });
    }

    fn fatal(&mut self, group: &str, message: &str) {
        self.events.push(HostEvent::Fatal {
            group: group.to_string(),
            message: message.to_string(),
        });
    }
}

/// Counts lifecycle hook calls as `[before_all, before_each, after_each, after_all]`.
#[derive(Debug, Default)]
pub struct HookCounts([Cell<usize>; 4]);

impl HookCounts {
    pub fn register<'g, H: TestHost + ?Sized>(&'g self, group: &mut Group<'g, H>) {
        let [before_all, before_each, after_each, after_all] = &self.0;
        group
            .before_all(move || before_all.set(before_all.get() + 1))
            .before_each(move || before_each.set(before_each.get() + 1))
            .after_each(move || after_each.set(after_each.get() + 1))
            .after_all(move || after_all.set(after_all.get() + 1));
    }

    pub fn get(&self) -> [usize; 4] {
        self.0.each_ref().map(Cell::get)
    }
}

/// A shared in-memory write target.
#[derive(Debug, Default, Clone)]
pub struct Buffer(Rc<RefCell<Vec<u8>>>);

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}
