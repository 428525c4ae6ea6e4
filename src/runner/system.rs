use std::{
    io::{self, Read},
    process::{Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use crossbeam_channel::Receiver;
use tracing::debug;

use crate::runner::{ExitState, Invocation, ProcessOutput, ProcessRunner};

/// Runs invocations as real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    poll_interval: Duration,
    drain_grace: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            drain_grace: Duration::from_millis(250),
        }
    }
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// How long to keep reading output once the child is gone.
    ///
    /// Processes left over in the child's process group are killed when the
    /// pipes are still open after this grace period.
    pub fn with_drain_grace(self, drain_grace: Duration) -> Self {
        Self {
            drain_grace,
            ..self
        }
    }
}

/// Start the child in a process group of its own.
///
/// The engine is usually a launcher like `pixi` whose child runs the actual
/// test, so signals have to reach the whole group.
#[cfg(unix)]
fn isolate(command: &mut Command) -> &mut Command {
    use std::os::unix::process::CommandExt;
    command.process_group(0)
}

#[cfg(not(unix))]
fn isolate(command: &mut Command) -> &mut Command {
    command
}

/// Kill every process in the group led by `pid`.
#[cfg(unix)]
fn kill_group(pid: u32) {
    if let Ok(pgid) = libc::pid_t::try_from(pid) {
        // SAFETY: kill(2) takes plain integers and touches no memory of ours.
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_: u32) {}

/// Read `source` to its end on a separate thread.
///
/// Both pipes have to be drained while the child runs, otherwise a child
/// filling one of them blocks forever.
fn drain<R: Read + Send + 'static>(source: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut source) = source {
            let _ = source.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });
    rx
}

fn collect(rx: &Receiver<Vec<u8>>, grace: Duration) -> Option<Vec<u8>> {
    match Instant::now().checked_add(grace) {
        Some(deadline) => rx.recv_deadline(deadline).ok(),
        None => rx.recv().ok(),
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, timeout: Option<Duration>) -> io::Result<ProcessOutput> {
        debug!(command = %invocation, ?timeout, "spawning engine");
        let start = Instant::now();
        let mut child = isolate(
            Command::new(&invocation.program)
                .args(&invocation.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped()),
        )
        .spawn()?;
        let pid = child.id();

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let state = loop {
            if let Some(status) = child.try_wait()? {
                break ExitState::Exited(status.code());
            }

            if let Some(timeout) = timeout
                && start.elapsed() >= timeout
            {
                kill_group(pid);
                let _ = child.kill();
                let _ = child.wait();
                break ExitState::TimedOut;
            }

            thread::sleep(self.poll_interval);
        };
        let elapsed = start.elapsed();

        let mut stdout_buf = collect(&stdout, self.drain_grace);
        let mut stderr_buf = collect(&stderr, self.drain_grace);
        if stdout_buf.is_none() || stderr_buf.is_none() {
            debug!(command = %invocation, "killing processes left behind by the engine");
            kill_group(pid);
            stdout_buf = stdout_buf.or_else(|| collect(&stdout, self.drain_grace));
            stderr_buf = stderr_buf.or_else(|| collect(&stderr, self.drain_grace));
        }

        debug!(command = %invocation, %state, ?elapsed, "engine finished");
        Ok(ProcessOutput {
            state,
            stdout: stdout_buf.unwrap_or_default(),
            stderr: stderr_buf.unwrap_or_default(),
            elapsed,
        })
    }
}
