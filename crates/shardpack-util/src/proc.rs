//! Blocking subprocess execution with a bounded timeout.
//!
//! Output is drained line-by-line through a caller-supplied callback so the
//! caller decides whether lines reach the console. Reader threads exist only
//! to keep the pipes from filling up; the call itself blocks until the child
//! exits or the timeout kills it.

use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Which pipe a forwarded line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Outcome of a bounded subprocess run.
#[derive(Debug)]
pub enum RunOutcome {
    /// The child exited on its own.
    Exited(ExitStatus),
    /// The deadline passed and the child was killed.
    TimedOut,
}

/// Run `cmd` to completion or until `timeout` elapses, forwarding each
/// output line to `on_line`.
///
/// Stdin is closed. On timeout the child is killed and reaped.
///
/// # Errors
/// Returns an error if the child cannot be spawned or waited on.
pub fn run_with_timeout<F>(
    cmd: &mut Command,
    timeout: Duration,
    mut on_line: F,
) -> io::Result<RunOutcome>
where
    F: FnMut(OutputStream, &str),
{
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn()?;

    let (tx, rx) = mpsc::channel();
    let mut readers = Vec::with_capacity(2);
    if let Some(out) = child.stdout.take() {
        readers.push(spawn_reader(OutputStream::Stdout, out, tx.clone()));
    }
    if let Some(err) = child.stderr.take() {
        readers.push(spawn_reader(OutputStream::Stderr, err, tx.clone()));
    }
    drop(tx);

    let deadline = Instant::now() + timeout;
    let outcome = loop {
        while let Ok((stream, line)) = rx.try_recv() {
            on_line(stream, &line);
        }

        if let Some(status) = child.try_wait()? {
            break RunOutcome::Exited(status);
        }

        if Instant::now() >= deadline {
            // The child may exit between try_wait and kill; either way we
            // already missed the deadline.
            let _ = child.kill();
            let _ = child.wait();
            break RunOutcome::TimedOut;
        }

        thread::sleep(Duration::from_millis(25));
    };

    for reader in readers {
        let _ = reader.join();
    }
    while let Ok((stream, line)) = rx.try_recv() {
        on_line(stream, &line);
    }

    Ok(outcome)
}

fn spawn_reader<R>(
    stream: OutputStream,
    reader: R,
    tx: mpsc::Sender<(OutputStream, String)>,
) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            let Ok(line) = line else { break };
            if tx.send((stream, line)).is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    }

    #[test]
    #[cfg(unix)]
    fn test_forwards_stdout_and_stderr_lines() {
        let mut lines = Vec::new();
        let outcome = run_with_timeout(
            &mut sh("echo one; echo two >&2"),
            Duration::from_secs(10),
            |stream, line| lines.push((stream, line.to_string())),
        )
        .unwrap();

        match outcome {
            RunOutcome::Exited(status) => assert!(status.success()),
            RunOutcome::TimedOut => panic!("should not time out"),
        }
        assert!(lines.contains(&(OutputStream::Stdout, "one".to_string())));
        assert!(lines.contains(&(OutputStream::Stderr, "two".to_string())));
    }

    #[test]
    #[cfg(unix)]
    fn test_reports_nonzero_exit() {
        let outcome =
            run_with_timeout(&mut sh("exit 3"), Duration::from_secs(10), |_, _| {}).unwrap();

        match outcome {
            RunOutcome::Exited(status) => assert_eq!(status.code(), Some(3)),
            RunOutcome::TimedOut => panic!("should not time out"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_kills_on_timeout() {
        let start = Instant::now();
        let mut cmd = Command::new("sleep");
        cmd.arg("30");
        let outcome =
            run_with_timeout(&mut cmd, Duration::from_millis(200), |_, _| {}).unwrap();

        assert!(matches!(outcome, RunOutcome::TimedOut));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_spawn_failure_is_an_error() {
        let mut cmd = Command::new("shardpack-test-no-such-program");
        let result = run_with_timeout(&mut cmd, Duration::from_secs(1), |_, _| {});
        assert!(result.is_err());
    }
}
