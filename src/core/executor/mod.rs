#![allow(clippy::result_large_err)]

//! Ties the catalog, formatter and runner together for one invocation.

use crate::core::command::{build_plan, CommandPlan};
use crate::core::config::FusionConfig;
use crate::core::descriptor::ToolDescriptor;
use crate::core::error::AppError;
use crate::core::params::ParameterValues;
use crate::core::registry::ToolRegistry;
use crate::core::runner::{CancelToken, ProcessRunner, ProgressSink, RunRequest, TokioProcessRunner};
use crate::core::types::{ErrorCategory, ExecutionStatus};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Resolved runtime settings shared by every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSettings {
    pub install_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub verbose: bool,
    pub timeout: Option<Duration>,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self::from_parts(&FusionConfig::default(), None)
    }
}

impl ExecutionSettings {
    pub fn from_config(config: &FusionConfig) -> Result<Self, AppError> {
        let timeout = config.execution.timeout_duration()?;
        Ok(Self::from_parts(config, timeout))
    }

    fn from_parts(config: &FusionConfig, timeout: Option<Duration>) -> Self {
        ExecutionSettings {
            install_dir: config.install.directory.clone(),
            scratch_dir: config.execution.scratch_dir.clone(),
            verbose: config.execution.verbose,
            timeout,
        }
    }
}

/// A validated invocation whose command line is known but not yet run.
#[derive(Debug, Clone)]
pub struct PreparedInvocation {
    pub invocation_id: Uuid,
    pub tool: Arc<ToolDescriptor>,
    pub invocation_dir: PathBuf,
    pub plan: CommandPlan,
}

impl PreparedInvocation {
    /// Rendered command line, as shown to users and logged.
    pub fn rendered_command(&self) -> String {
        self.plan.command.render()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub invocation_id: Uuid,
    pub tool: String,
    pub command: String,
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub output_lines: Vec<String>,
    pub outputs: IndexMap<String, PathBuf>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

pub struct FusionExecutor {
    settings: ExecutionSettings,
    registry: ToolRegistry,
    runner: Arc<dyn ProcessRunner>,
}

impl FusionExecutor {
    pub fn new(settings: ExecutionSettings, registry: ToolRegistry) -> Self {
        Self::with_runner(settings, registry, Arc::new(TokioProcessRunner))
    }

    pub fn with_runner(
        settings: ExecutionSettings,
        registry: ToolRegistry,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        FusionExecutor {
            settings,
            registry,
            runner,
        }
    }

    pub fn settings(&self) -> &ExecutionSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Validates `values` and builds the command plan without touching the
    /// filesystem.
    pub fn prepare(
        &self,
        tool_id: &str,
        values: &ParameterValues,
    ) -> Result<PreparedInvocation, AppError> {
        let tool = self.registry.lookup(tool_id)?;
        let invocation_id = Uuid::new_v4();
        let invocation_dir = self.settings.scratch_dir.join(invocation_id.to_string());

        let resolved = tool.resolve(values, &invocation_dir).map_err(|err| {
            let mut app: AppError = err.into();
            app.add_context("tool", tool.id);
            app
        })?;
        let plan = build_plan(&tool, &resolved, &self.settings.install_dir, &invocation_dir);

        tracing::debug!(
            tool = tool.id,
            invocation = %invocation_id,
            command = %plan.command,
            "prepared FUSION invocation"
        );

        Ok(PreparedInvocation {
            invocation_id,
            tool,
            invocation_dir,
            plan,
        })
    }

    /// Prepares and runs one invocation, streaming progress to `sink`.
    pub async fn execute(
        &self,
        tool_id: &str,
        values: &ParameterValues,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ExecutionResult, AppError> {
        let prepared = self.prepare(tool_id, values)?;
        self.run_prepared(&prepared, sink, cancel).await
    }

    pub async fn run_prepared(
        &self,
        prepared: &PreparedInvocation,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ExecutionResult, AppError> {
        write_scratch_files(prepared)?;

        let rendered = prepared.rendered_command();
        sink.push_info("FUSION command:");
        sink.push_command(&rendered);
        sink.push_info("FUSION command output:");

        let mut request = RunRequest::new(prepared.plan.command.clone());
        request.timeout = self.settings.timeout;
        request.launch = prepared.plan.launch;

        let started_at = Utc::now();
        let started = Instant::now();
        let outcome = self.runner.run(&request, sink, cancel).await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        if self.settings.verbose {
            for line in &outcome.lines {
                tracing::info!(tool = prepared.tool.id, "{}", line);
            }
        }

        tracing::info!(
            tool = prepared.tool.id,
            invocation = %prepared.invocation_id,
            status = %outcome.status,
            duration_ms,
            "FUSION invocation finished"
        );

        Ok(ExecutionResult {
            invocation_id: prepared.invocation_id,
            tool: prepared.tool.id.to_string(),
            command: rendered,
            status: outcome.status,
            exit_code: outcome.exit_code,
            output_lines: outcome.lines,
            outputs: prepared.plan.outputs.clone(),
            started_at,
            duration_ms,
        })
    }
}

fn write_scratch_files(prepared: &PreparedInvocation) -> Result<(), AppError> {
    std::fs::create_dir_all(&prepared.invocation_dir)
        .map_err(|err| io_error("FUS-IO-001", "create scratch directory", &prepared.invocation_dir, err))?;

    for list in &prepared.plan.list_files {
        std::fs::write(&list.path, list.contents())
            .map_err(|err| io_error("FUS-IO-002", "write list file", &list.path, err))?;
        tracing::debug!(path = %list.path.display(), files = list.entries.len(), "wrote list file");
    }
    Ok(())
}

fn io_error(code: &str, action: &str, path: &Path, err: std::io::Error) -> AppError {
    let mut app = AppError::new(
        ErrorCategory::IoError,
        format!("failed to {} {}: {}", action, path.display(), err),
    )
    .with_code(code);
    app.add_context("path", &path.display().to_string());
    app
}
