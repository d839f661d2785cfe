use crate::cli::{args::OutputFormat, Command};
use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A person is reading the terminal.
    Interactive,
    /// Stdout carries JSON for another program, so the console stays quiet.
    Machine,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled unless configured.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Machine)
    }
}

/// Derive the active execution context from a parsed CLI command plus overrides.
pub fn detect_context(command: &Command) -> ExecutionContext {
    if quiet_override_enabled() || command.format() == OutputFormat::Json {
        ExecutionContext::Machine
    } else {
        ExecutionContext::Interactive
    }
}

fn quiet_override_enabled() -> bool {
    env::var("FUSION_QUIET")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
