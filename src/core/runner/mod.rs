#![allow(clippy::result_large_err)] // Runner returns AppError so spawn failures keep their diagnostic code and context.

//! Runs one FUSION executable and streams its console output.

pub mod cancel;
pub mod progress;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use progress::{
    progress_channel, ChannelSink, ConsoleSink, ProgressEvent, ProgressSink, ProgressStream,
    TracingSink,
};

use crate::core::command::CommandLine;
use crate::core::descriptor::Launch;
use crate::core::error::AppError;
use crate::core::types::{ErrorCategory, ExecutionStatus};
use async_trait::async_trait;
use std::io::{BufRead, BufReader, PipeReader};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::Instant;

pub const SPAWN_ERROR_CODE: &str = "FUS-RUN-001";
pub const PIPE_ERROR_CODE: &str = "FUS-RUN-002";

#[derive(Clone, Debug)]
pub struct RunRequest {
    pub command: CommandLine,
    pub working_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub launch: Launch,
}

impl RunRequest {
    pub fn new(command: CommandLine) -> Self {
        Self {
            command,
            working_dir: None,
            timeout: None,
            launch: Launch::Wait,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub status: ExecutionStatus,
    pub exit_code: Option<i32>,
    /// Merged stdout/stderr lines in the order they were produced.
    pub lines: Vec<String>,
}

#[async_trait]
pub trait ProcessRunner: Send + Sync + 'static {
    /// Runs the request to completion.
    ///
    /// Failing to start the process is an `Err`. Every other ending,
    /// including non-zero exits, cancellation and timeouts, is an `Ok`
    /// carrying the terminal status.
    async fn run(
        &self,
        request: &RunRequest,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<RunOutcome, AppError>;
}

/// Default runner backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        request: &RunRequest,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<RunOutcome, AppError> {
        if cancel.is_cancelled() {
            tracing::info!("cancelled before start: {}", request.command.program.display());
            return Ok(finish(sink, ExecutionStatus::Cancelled, None, Vec::new()));
        }

        if request.launch == Launch::Detached {
            return launch_detached(request, sink);
        }

        // stdout and stderr share one pipe so their lines keep the child's ordering.
        let (reader, writer) = std::io::pipe().map_err(|err| pipe_error(request, err))?;
        let stderr_writer = writer.try_clone().map_err(|err| pipe_error(request, err))?;

        let mut command = base_command(request);
        command
            .stdout(Stdio::from(writer))
            .stderr(Stdio::from(stderr_writer))
            .kill_on_drop(true);
        let spawned = command.spawn();
        // The builder still owns the write ends; drop it so the pipe reaches EOF.
        drop(command);
        let mut child = spawned.map_err(|err| spawn_error(request, err))?;

        tracing::debug!(
            program = %request.command.program.display(),
            pid = child.id().unwrap_or_default(),
            "spawned FUSION process"
        );

        let (line_tx, mut line_rx) = mpsc::unbounded_channel();
        let reader_thread = std::thread::Builder::new()
            .name("fusion-output".to_string())
            .spawn(move || forward_lines(reader, line_tx));
        if let Err(err) = reader_thread {
            terminate(&mut child).await;
            return Err(pipe_error(request, err));
        }

        let deadline = request.timeout.map(|timeout| Instant::now() + timeout);
        let mut cancel = cancel.clone();
        let mut lines = Vec::new();
        let mut stream_open = true;

        let ending = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break Ending::Cancelled,
                _ = wait_deadline(deadline) => break Ending::TimedOut,
                line = line_rx.recv(), if stream_open => match line {
                    Some(line) => {
                        sink.push_console_line(&line);
                        lines.push(line);
                    }
                    None => stream_open = false,
                },
                status = child.wait(), if !stream_open => break Ending::Exited(status),
            }
        };

        let outcome = match ending {
            Ending::Exited(Ok(status)) => {
                let exit_code = status.code();
                let status = exit_status(status);
                if status == ExecutionStatus::Failed {
                    tracing::warn!(
                        program = %request.command.program.display(),
                        exit_code = ?exit_code,
                        "FUSION process exited unsuccessfully"
                    );
                }
                (status, exit_code)
            }
            Ending::Exited(Err(err)) => {
                tracing::warn!(error = %err, "failed to wait for FUSION process");
                (ExecutionStatus::Failed, None)
            }
            Ending::Cancelled => {
                terminate(&mut child).await;
                tracing::info!(
                    program = %request.command.program.display(),
                    "FUSION process cancelled"
                );
                (ExecutionStatus::Cancelled, None)
            }
            Ending::TimedOut => {
                terminate(&mut child).await;
                tracing::warn!(
                    program = %request.command.program.display(),
                    timeout = ?request.timeout,
                    "FUSION process timed out"
                );
                (ExecutionStatus::TimedOut, None)
            }
        };

        // Deliver whatever was already read before the process ended.
        while let Ok(line) = line_rx.try_recv() {
            sink.push_console_line(&line);
            lines.push(line);
        }

        Ok(finish(sink, outcome.0, outcome.1, lines))
    }
}

enum Ending {
    Exited(std::io::Result<ExitStatus>),
    Cancelled,
    TimedOut,
}

fn base_command(request: &RunRequest) -> Command {
    let mut command = Command::new(&request.command.program);
    command.args(&request.command.args).stdin(Stdio::null());
    if let Some(dir) = &request.working_dir {
        command.current_dir(dir);
    }
    command
}

fn launch_detached(request: &RunRequest, sink: &dyn ProgressSink) -> Result<RunOutcome, AppError> {
    let mut command = base_command(request);
    command.stdout(Stdio::null()).stderr(Stdio::null());
    let child = command.spawn().map_err(|err| spawn_error(request, err))?;
    tracing::info!(
        program = %request.command.program.display(),
        pid = child.id().unwrap_or_default(),
        "launched detached FUSION process"
    );
    Ok(finish(sink, ExecutionStatus::Completed, None, Vec::new()))
}

fn finish(
    sink: &dyn ProgressSink,
    status: ExecutionStatus,
    exit_code: Option<i32>,
    lines: Vec<String>,
) -> RunOutcome {
    sink.push_finished(status);
    RunOutcome {
        status,
        exit_code,
        lines,
    }
}

fn exit_status(status: ExitStatus) -> ExecutionStatus {
    if status.success() {
        ExecutionStatus::Completed
    } else {
        ExecutionStatus::Failed
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

async fn terminate(child: &mut Child) {
    if let Err(err) = child.kill().await {
        tracing::warn!(error = %err, "failed to kill FUSION process");
    }
}

/// Reads merged output line by line on a dedicated thread.
fn forward_lines(reader: PipeReader, sender: mpsc::UnboundedSender<String>) {
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buffer)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                if sender.send(line).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read FUSION output");
                break;
            }
        }
    }
}

fn spawn_error(request: &RunRequest, err: std::io::Error) -> AppError {
    let program = request.command.program.display().to_string();
    let mut app = AppError::new(
        ErrorCategory::ToolExecutionError,
        format!("failed to start {}: {}", program, err),
    )
    .with_code(SPAWN_ERROR_CODE)
    .with_suggestion("Check that the FUSION install directory is configured (FUSION_DIRECTORY or install.directory)");
    app.add_context("program", &program);
    app
}

fn pipe_error(request: &RunRequest, err: std::io::Error) -> AppError {
    let mut app = AppError::new(
        ErrorCategory::IoError,
        format!("failed to set up output capture: {}", err),
    )
    .with_code(PIPE_ERROR_CODE);
    app.add_context("program", &request.command.program.display().to_string());
    app
}
