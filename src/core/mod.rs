pub mod command;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod params;
pub mod registry;
pub mod runner;
pub mod types;

pub use command::{build_plan, CommandLine, CommandPlan, ListFile};
pub use config::{ConfigLoader, ConfigValidator, FusionConfig};
pub use descriptor::{Executable, Launch, ToolDescriptor, ToolGroup};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use executor::{ExecutionResult, ExecutionSettings, FusionExecutor, PreparedInvocation};
pub use params::{Extent, ParameterError, ParameterSpec, ParameterValue, ParameterValues};
pub use registry::ToolRegistry;
pub use runner::{
    cancel_pair, CancelHandle, CancelToken, ProcessRunner, ProgressEvent, ProgressSink,
    TokioProcessRunner,
};
pub use types::*;
