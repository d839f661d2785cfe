#![cfg(unix)]

use fusion_processing::core::runner::{progress_channel, RunOutcome, RunRequest};
use fusion_processing::core::{
    cancel_pair, CancelToken, CommandLine, ExecutionStatus, Launch, ProcessRunner, ProgressEvent,
    TokioProcessRunner,
};
use serial_test::serial;
use std::time::{Duration, Instant};
use tokio_stream::StreamExt;

fn shell(script: &str) -> RunRequest {
    RunRequest::new(CommandLine::new("/bin/sh").arg("-c").arg(script))
}

async fn run_collecting(
    request: RunRequest,
    cancel: &CancelToken,
) -> (RunOutcome, Vec<ProgressEvent>) {
    let (sink, stream) = progress_channel();
    let outcome = TokioProcessRunner
        .run(&request, &sink, cancel)
        .await
        .expect("process starts");
    drop(sink);
    (outcome, stream.collect().await)
}

#[tokio::test]
#[serial]
async fn stdout_and_stderr_lines_keep_their_order() {
    let request = shell("echo one; echo two >&2; echo three");
    let (outcome, events) = run_collecting(request, &CancelToken::never()).await;

    assert_eq!(outcome.status, ExecutionStatus::Completed);
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.lines, vec!["one", "two", "three"]);
    assert_eq!(
        events,
        vec![
            ProgressEvent::Line("one".to_string()),
            ProgressEvent::Line("two".to_string()),
            ProgressEvent::Line("three".to_string()),
            ProgressEvent::Finished(ExecutionStatus::Completed),
        ]
    );
}

#[tokio::test]
#[serial]
async fn non_zero_exit_is_a_failed_outcome() {
    let (outcome, events) =
        run_collecting(shell("echo failing; exit 3"), &CancelToken::never()).await;

    assert_eq!(outcome.status, ExecutionStatus::Failed);
    assert_eq!(outcome.exit_code, Some(3));
    assert_eq!(outcome.lines, vec!["failing"]);
    let finished = events
        .iter()
        .filter(|event| matches!(event, ProgressEvent::Finished(_)))
        .count();
    assert_eq!(finished, 1);
}

#[tokio::test]
#[serial]
async fn carriage_returns_and_unterminated_lines_are_handled() {
    let (outcome, _) = run_collecting(shell("printf 'a\\r\\nb'"), &CancelToken::never()).await;
    assert_eq!(outcome.lines, vec!["a", "b"]);
}

#[tokio::test]
#[serial]
async fn cancelling_kills_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let pid_file = dir.path().join("child.pid");
    let (handle, token) = cancel_pair();
    let request = shell(&format!(
        "echo $$ > '{}'; echo ready; exec sleep 30",
        pid_file.display()
    ));
    let started = Instant::now();

    let (result, _) = tokio::join!(run_collecting(request, &token), async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.cancel();
    });
    let (outcome, events) = result;

    assert_eq!(outcome.status, ExecutionStatus::Cancelled);
    assert_eq!(outcome.exit_code, None);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::Finished(ExecutionStatus::Cancelled))
    );

    let pid = std::fs::read_to_string(&pid_file).unwrap();
    let signal = std::process::Command::new("kill")
        .args(["-0", pid.trim()])
        .stderr(std::process::Stdio::null())
        .status()
        .unwrap();
    assert!(!signal.success(), "process {} still running", pid.trim());
}

#[tokio::test]
#[serial]
async fn timeout_kills_the_process() {
    let mut request = shell("sleep 30");
    request.timeout = Some(Duration::from_millis(200));
    let started = Instant::now();

    let (outcome, events) = run_collecting(request, &CancelToken::never()).await;

    assert_eq!(outcome.status, ExecutionStatus::TimedOut);
    assert_eq!(outcome.status.exit_code(), 124);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(events, vec![ProgressEvent::Finished(ExecutionStatus::TimedOut)]);
}

#[tokio::test]
#[serial]
async fn working_directory_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let mut request = shell("pwd");
    request.working_dir = Some(dir.path().to_path_buf());

    let (outcome, _) = run_collecting(request, &CancelToken::never()).await;

    assert_eq!(outcome.lines.len(), 1);
    assert_eq!(
        std::fs::canonicalize(&outcome.lines[0]).unwrap(),
        std::fs::canonicalize(dir.path()).unwrap()
    );
}

#[tokio::test]
#[serial]
async fn detached_launch_returns_immediately() {
    let mut request = shell("sleep 2");
    request.launch = Launch::Detached;
    let started = Instant::now();

    let (outcome, events) = run_collecting(request, &CancelToken::never()).await;

    assert_eq!(outcome.status, ExecutionStatus::Completed);
    assert!(outcome.lines.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(events, vec![ProgressEvent::Finished(ExecutionStatus::Completed)]);
}
