use std::{
    io,
    sync::{Arc, LazyLock, Mutex},
};

use regex::Regex;
use testgroup::formatter::pretty::SupportsColor;

#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        io::Write::write(&mut *guard, buf)
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

impl Buffer {
    pub fn sanitized(&self) -> String {
        let guard = self.0.lock().unwrap();
        sanitize_duration(&String::from_utf8_lossy(&guard))
    }
}

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"finished in \d+\.\d+s").unwrap());

pub fn sanitize_duration(input: &str) -> String {
    DURATION_RE
        .replace_all(input, "finished in <duration>")
        .to_string()
}
