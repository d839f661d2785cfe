use crate::core::descriptor::ToolGroup;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, clap::ValueEnum, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON payload suitable for downstream tooling
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ToolsArgs {
    /// Only list tools of this group (conversion, points, surface, visualization)
    #[arg(long, value_name = "GROUP", value_parser = parse_group)]
    pub group: Option<ToolGroup>,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    /// Tool identifier, e.g. clipdata
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

/// Parameter values shared by `command` and `run`.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Parameter value; repeat for several parameters
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// JSON or YAML file with parameter values; --param entries take precedence
    #[arg(long, value_name = "FILE")]
    pub params_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CommandArgs {
    /// Tool identifier, e.g. clipdata
    #[arg(value_name = "TOOL")]
    pub tool: String,

    #[command(flatten)]
    pub params: ParamArgs,

    /// FUSION install directory (overrides FUSION_DIRECTORY and the config file)
    #[arg(long, value_name = "DIR", help_heading = "Configuration")]
    pub install_dir: Option<PathBuf>,

    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Tool identifier, e.g. clipdata
    #[arg(value_name = "TOOL")]
    pub tool: String,

    #[command(flatten)]
    pub params: ParamArgs,

    /// FUSION install directory (overrides FUSION_DIRECTORY and the config file)
    #[arg(long, value_name = "DIR", help_heading = "Configuration")]
    pub install_dir: Option<PathBuf>,

    /// Kill the tool after this long, e.g. 90s or 10m
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration, help_heading = "Configuration")]
    pub timeout: Option<Duration>,

    /// Log the full tool output after it finishes
    #[arg(long, help_heading = "Output Options")]
    pub verbose: bool,

    /// Stream text output, or print one JSON result when the tool finishes
    #[arg(long, default_value = "text", value_name = "FORMAT", help_heading = "Output Options")]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Emit either terminal-friendly text or machine-readable JSON
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn parse_group(raw: &str) -> Result<ToolGroup, String> {
    ToolGroup::from_id(raw).ok_or_else(|| {
        let known: Vec<&str> = ToolGroup::ALL.iter().map(|group| group.id()).collect();
        format!("unknown group '{}'; expected one of {}", raw, known.join(", "))
    })
}
