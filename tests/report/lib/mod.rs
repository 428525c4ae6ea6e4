use std::{
    collections::HashMap,
    io,
    string::FromUtf8Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use ranktest::{
    formatter::common::color::SupportsColor,
    runner::{ExitState, Invocation, ProcessOutput, ProcessRunner},
};

#[derive(Debug)]
#[allow(dead_code)]
pub enum Error {
    Poison,
    FromUtf8(FromUtf8Error),
}

/// Shared in-memory target, clones write into the same buffer.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    data: Arc<Mutex<Vec<u8>>>,
    color: bool,
}

impl Buffer {
    pub fn colored() -> Self {
        Self {
            color: true,
            ..Default::default()
        }
    }

    pub fn try_to_string(&self) -> Result<String, Error> {
        let guard = self.data.lock().map_err(|_| Error::Poison)?;
        String::from_utf8(guard.to_vec()).map_err(Error::FromUtf8)
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .data
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        self.color
    }
}

/// Engine stand-in answering from a table keyed by the selected test.
#[derive(Debug, Default)]
pub struct FakeEngine {
    listing: Option<ProcessOutput>,
    tests: HashMap<String, ProcessOutput>,
}

fn output(state: ExitState, stdout: &str, stderr: &str) -> ProcessOutput {
    ProcessOutput {
        state,
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
        elapsed: Duration::from_millis(1),
    }
}

impl FakeEngine {
    pub fn listing(mut self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.listing = Some(output(ExitState::Exited(Some(code)), stdout, stderr));
        self
    }

    pub fn test(mut self, id: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.tests.insert(
            id.to_string(),
            output(ExitState::Exited(Some(code)), stdout, stderr),
        );
        self
    }

    pub fn hanging_test(mut self, id: &str, after: Duration) -> Self {
        let mut hung = output(ExitState::TimedOut, "", "");
        hung.elapsed = after;
        self.tests.insert(id.to_string(), hung);
        self
    }
}

impl ProcessRunner for FakeEngine {
    fn run(&self, invocation: &Invocation, _: Option<Duration>) -> io::Result<ProcessOutput> {
        let found = match invocation.args.last().map(String::as_str) {
            Some("--collect-only") => self.listing.as_ref(),
            Some(id) => self.tests.get(id),
            None => None,
        };
        found
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}
