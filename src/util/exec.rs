use std::ffi::OsString;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

/// Failure to obtain an exit status from a child process.
#[derive(Debug)]
pub enum ExecError {
    Spawn(io::Error),
    Wait(io::Error),
    TimedOut(Duration),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Spawn(e) | ExecError::Wait(e) => write!(f, "{e}"),
            ExecError::TimedOut(_) => f.write_str("Command timed out"),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Spawn(e) | ExecError::Wait(e) => Some(e),
            ExecError::TimedOut(_) => None,
        }
    }
}

/// Blocking command execution with a wall-clock timeout.
#[derive(Debug, Clone)]
pub struct ExecService {
    default_timeout: Duration,
}

impl ExecService {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn run(&self, request: ExecRequest) -> Result<ExecOutput, ExecError> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        if let Some(ref cwd) = request.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &request.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(ExecError::Spawn)?;

        // Drain both pipes while waiting; a full pipe would otherwise stall the child.
        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let timeout = self.default_timeout;
        let started = Instant::now();
        let status = if timeout.is_zero() {
            child.wait().map_err(ExecError::Wait)?
        } else {
            match child.wait_timeout(timeout).map_err(ExecError::Wait)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExecError::TimedOut(timeout));
                }
            }
        };

        let duration = started.elapsed();
        Ok(ExecOutput {
            status,
            duration,
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
        })
    }
}

impl Default for ExecService {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<String>> {
    stream.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[derive(Debug, Default)]
pub struct ExecRequest {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
}

impl ExecRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug)]
pub struct ExecOutput {
    pub status: ExitStatus,
    pub duration: Duration,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failure_reports_os_error() {
        let svc = ExecService::default();
        let err = svc
            .run(ExecRequest::new("branchcheck-definitely-missing-binary"))
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn(_)), "got {err:?}");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_timed_out_display_is_stable() {
        let err = ExecError::TimedOut(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Command timed out");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_long_running_child() {
        let svc = ExecService::new(Duration::from_millis(200));
        let started = Instant::now();
        let err = svc
            .run(ExecRequest::new("sleep").arg("5"))
            .unwrap_err();
        assert!(matches!(err, ExecError::TimedOut(_)), "got {err:?}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_exit_status() {
        let svc = ExecService::default();
        let out = svc
            .run(ExecRequest::new("sh").args(["-c", "echo hello; echo oops >&2; exit 3"]))
            .expect("sh runs");
        assert!(!out.status.success());
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_does_not_deadlock() {
        let svc = ExecService::new(Duration::from_secs(20));
        let out = svc
            .run(ExecRequest::new("sh").args(["-c", "head -c 300000 /dev/zero | tr '\\0' x"]))
            .expect("sh runs");
        assert!(out.status.success());
        assert_eq!(out.stdout.len(), 300000);
    }
}
