pub mod args;
pub mod commands;

pub use args::{
    CommandArgs, ConfigArgs, DescribeArgs, OutputFormat, ParamArgs, RunArgs, ToolsArgs,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
TOOL COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "fusion")]
#[command(version = crate::VERSION)]
#[command(about = "Run FUSION LIDAR processing tools from typed parameters")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: list tools, describe one, preview its command line, then run it."
)]
pub struct Args {
    /// Config file (defaults to <config dir>/fusion-processing/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "List the available FUSION tools",
        long_about = "Tools prints every registered tool with its group and executable, optionally restricted to one group.",
        after_help = "Example:\n    fusion tools --group points"
    )]
    Tools(ToolsArgs),
    #[command(
        about = "Show the parameters of one tool",
        long_about = "Describe lists each parameter of a tool with its kind, default, bounds and whether it is required.",
        after_help = "Example:\n    fusion describe clipdata"
    )]
    Describe(DescribeArgs),
    #[command(
        name = "command",
        about = "Print the command line a tool would run",
        long_about = "Command validates the parameters and prints the full FUSION command line without running it or writing any file.",
        after_help = "Example:\n    fusion command clipdata -p input=a.las -p extent=0,0,100,100"
    )]
    Plan(CommandArgs),
    #[command(
        about = "Run a FUSION tool",
        long_about = "Run validates the parameters, writes any list files, executes the tool and streams its output. Ctrl-C stops the tool.",
        after_help = "Example:\n    fusion run gridsurfacecreate -p input=ground.las -p output=ground.dtm --timeout 30m"
    )]
    Run(RunArgs),
    #[command(
        about = "Show the effective configuration",
        long_about = "Config prints the configuration after file and environment overrides, plus any warnings and the supported environment variables.",
        after_help = "Example:\n    fusion config --format json"
    )]
    Config(ConfigArgs),
}

impl Command {
    /// Output format requested by the subcommand.
    pub fn format(&self) -> OutputFormat {
        match self {
            Command::Tools(args) => args.format,
            Command::Describe(args) => args.format,
            Command::Plan(args) => args.format,
            Command::Run(args) => args.format,
            Command::Config(args) => args.format,
        }
    }
}

/// Dispatches the parsed command and returns the process exit code.
pub async fn run(args: Args) -> crate::Result<i32> {
    let config_path = args.config.as_deref();
    match args.command {
        Command::Tools(tools_args) => commands::tools(tools_args).map(|_| 0),
        Command::Describe(describe_args) => commands::describe(describe_args).map(|_| 0),
        Command::Plan(command_args) => commands::command(command_args, config_path).map(|_| 0),
        Command::Run(run_args) => commands::run(run_args, config_path).await,
        Command::Config(config_args) => commands::config(config_args, config_path).map(|_| 0),
    }
}
