//! Blocking external command execution with a timeout.
//!
//! Launchers start scripts with a minimal environment, so the `PATH` handed
//! to children is extended with the usual Homebrew and system directories.

use log::debug;
use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Directories appended to `PATH` when missing.
pub const DEFAULT_PATHS: &[&str] = &[
    "/opt/homebrew/bin",
    "/usr/local/bin",
    "/usr/bin",
    "/bin",
    "/usr/sbin",
    "/sbin",
];

/// Timeout applied to window-manager calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from running an external command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} timed out after {}s", timeout.as_secs_f64())]
    Timeout { program: String, timeout: Duration },
    /// Non-zero exit; carries the child's own diagnostic.
    #[error("{0}")]
    Failed(String),
    #[error("io error while waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Append every [`DEFAULT_PATHS`] entry that `current` lacks.
pub fn augmented_path(current: &str) -> String {
    let mut parts: Vec<&str> = current.split(':').filter(|p| !p.is_empty()).collect();
    for &path in DEFAULT_PATHS {
        if !parts.contains(&path) {
            parts.push(path);
        }
    }
    parts.join(":")
}

/// Pick the message reported for a failed command: stderr, else stdout,
/// else `fallback`.
pub fn failure_message(stderr: &str, stdout: &str, fallback: &str) -> String {
    let stderr = stderr.trim();
    let stdout = stdout.trim();
    if !stderr.is_empty() {
        stderr.to_string()
    } else if !stdout.is_empty() {
        stdout.to_string()
    } else {
        fallback.to_string()
    }
}

/// Captured result of a finished command.
#[derive(Debug)]
pub struct Output {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` and wait at most `timeout` for it to exit.
///
/// The child is killed when the deadline passes.  Exit status is not
/// inspected here; see [`run_checked`].
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Result<Output, CommandError> {
    debug!("running {} {:?}", program, args);
    let path = augmented_path(&std::env::var("PATH").unwrap_or_default());

    let mut child = Command::new(program)
        .args(args)
        .env("PATH", path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?;

    // Drain both pipes concurrently so a chatty child cannot block on a
    // full pipe while we poll for its exit.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CommandError::Timeout {
                    program: program.to_string(),
                    timeout,
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                return Err(CommandError::Wait {
                    program: program.to_string(),
                    source,
                })
            }
        }
    };

    Ok(Output {
        status,
        stdout: stdout.map(join).unwrap_or_default(),
        stderr: stderr.map(join).unwrap_or_default(),
    })
}

/// Like [`run_with_timeout`], but a non-zero exit becomes
/// [`CommandError::Failed`] and only stdout is returned.
pub fn run_checked(program: &str, args: &[&str], timeout: Duration) -> Result<String, CommandError> {
    let output = run_with_timeout(program, args, timeout)?;
    if !output.status.success() {
        let message = failure_message(&output.stderr, &output.stdout, "Command failed.");
        debug!("{} exited with {}: {}", program, output.status, message);
        return Err(CommandError::Failed(message));
    }
    Ok(output.stdout)
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
