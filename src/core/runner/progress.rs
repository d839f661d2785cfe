use crate::core::types::ExecutionStatus;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Receives live progress of one invocation.
///
/// Lines arrive in the order the child wrote them. `push_finished` is called
/// exactly once per run that spawned a process.
pub trait ProgressSink: Send + Sync {
    fn push_info(&self, _message: &str) {}

    fn push_command(&self, _command: &str) {}

    fn push_console_line(&self, line: &str);

    fn push_finished(&self, _status: ExecutionStatus) {}
}

/// Forwards progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn push_info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn push_command(&self, command: &str) {
        tracing::info!(command = %command, "FUSION command");
    }

    fn push_console_line(&self, line: &str) {
        tracing::info!(target: "fusion::console", "{}", line);
    }

    fn push_finished(&self, status: ExecutionStatus) {
        tracing::debug!(status = %status, "FUSION process finished");
    }
}

/// Writes console lines to a writer, typically stdout.
pub struct ConsoleSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_line(&self, line: &str) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            tracing::warn!(error = %err, "failed to write console line");
        }
    }
}

impl<W: Write + Send> ProgressSink for ConsoleSink<W> {
    fn push_info(&self, message: &str) {
        self.write_line(message);
    }

    fn push_command(&self, command: &str) {
        self.write_line(command);
    }

    fn push_console_line(&self, line: &str) {
        self.write_line(line);
    }
}

/// Progress notifications as values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ProgressEvent {
    Info(String),
    Command(String),
    Line(String),
    Finished(ExecutionStatus),
}

/// Sink that publishes [`ProgressEvent`]s to a channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

/// Stream side of [`progress_channel`]. Ends when every sink clone is dropped.
pub type ProgressStream = UnboundedReceiverStream<ProgressEvent>;

pub fn progress_channel() -> (ChannelSink, ProgressStream) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelSink { sender }, UnboundedReceiverStream::new(receiver))
}

impl ChannelSink {
    fn publish(&self, event: ProgressEvent) {
        // A dropped receiver means nobody is listening any more.
        let _ = self.sender.send(event);
    }
}

impl ProgressSink for ChannelSink {
    fn push_info(&self, message: &str) {
        self.publish(ProgressEvent::Info(message.to_string()));
    }

    fn push_command(&self, command: &str) {
        self.publish(ProgressEvent::Command(command.to_string()));
    }

    fn push_console_line(&self, line: &str) {
        self.publish(ProgressEvent::Line(line.to_string()));
    }

    fn push_finished(&self, status: ExecutionStatus) {
        self.publish(ProgressEvent::Finished(status));
    }
}
