use crate::{
    cli::args::{CommandArgs, ConfigArgs, DescribeArgs, OutputFormat, ParamArgs, RunArgs, ToolsArgs},
    core::{
        cancel_pair,
        params::{ParameterKind, ParameterSpec},
        runner::{ConsoleSink, TracingSink},
        AppError, ConfigLoader, ConfigValidator, ErrorCategory, ExecutionResult, ExecutionSettings, FusionConfig,
        FusionExecutor, ParameterValue, ParameterValues, PreparedInvocation, ToolDescriptor,
        ToolRegistry,
    },
    utils::serialization::load_file,
    Result,
};
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn tools(args: ToolsArgs) -> Result<()> {
    let registry = ToolRegistry::builtin();
    let tools: Vec<_> = registry
        .iter()
        .filter(|tool| args.group.map_or(true, |group| tool.group == group))
        .collect();

    match args.format {
        OutputFormat::Text => {
            for tool in tools {
                println!(
                    "{:<18} {:<14} {}",
                    tool.id,
                    tool.group.display_name(),
                    tool.summary
                );
            }
        }
        OutputFormat::Json => {
            let listing: Vec<_> = tools
                .iter()
                .map(|tool| {
                    json!({
                        "id": tool.id,
                        "name": tool.name,
                        "group": tool.group,
                        "summary": tool.summary,
                        "executable": tool.executable,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}

pub fn describe(args: DescribeArgs) -> Result<()> {
    let registry = ToolRegistry::builtin();
    let tool = registry.lookup(&args.tool)?;

    match args.format {
        OutputFormat::Text => print_description(&tool),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tool.as_ref())?),
    }
    Ok(())
}

fn print_description(tool: &ToolDescriptor) {
    println!("{} ({})", tool.name, tool.id);
    println!("{}", tool.summary);
    println!("Group: {}", tool.group.display_name());
    println!("\nParameters:");
    for spec in &tool.parameters {
        println!("  {:<16} {}", spec.key, describe_parameter(spec));
        println!("  {:<16} {}", "", spec.label);
    }
}

fn describe_parameter(spec: &ParameterSpec) -> String {
    let mut notes = vec![spec.kind.type_name().to_string()];
    if spec.is_required() {
        notes.push("required".to_string());
    }
    if spec.advanced {
        notes.push("advanced".to_string());
    }
    match &spec.kind {
        ParameterKind::File {
            extensions,
            multiple,
            ..
        } => {
            if !extensions.is_empty() {
                notes.push(format!("*.{}", extensions.join(", *.")));
            }
            if *multiple {
                notes.push("several files allowed".to_string());
            }
        }
        ParameterKind::Number { min, max, .. } => match (min, max) {
            (Some(min), Some(max)) => notes.push(format!("{} to {}", min, max)),
            (Some(min), None) => notes.push(format!("at least {}", min)),
            (None, Some(max)) => notes.push(format!("at most {}", max)),
            (None, None) => {}
        },
        ParameterKind::Enum { options } => {
            let labels: Vec<_> = options.iter().map(|option| option.label).collect();
            notes.push(format!("one of {}", labels.join(" | ")));
        }
        ParameterKind::Boolean | ParameterKind::String | ParameterKind::Extent => {}
    }
    if let Some(default) = &spec.default {
        let rendered = match spec.kind {
            ParameterKind::Enum { options } => match default {
                ParameterValue::Choice(index) => options
                    .get(*index)
                    .map(|option| option.label.to_string())
                    .unwrap_or_default(),
                other => other.render(options),
            },
            _ => default.render(&[]),
        };
        notes.push(format!("default {}", rendered));
    }
    notes.join(", ")
}

/// Dry run: validate and print the command line without touching the filesystem.
pub fn command(args: CommandArgs, config_path: Option<&Path>) -> Result<()> {
    let config = effective_config(config_path, args.install_dir)?;
    let executor = FusionExecutor::new(
        ExecutionSettings::from_config(&config)?,
        ToolRegistry::builtin(),
    );
    let values = load_values(&args.params)?;
    let prepared = executor.prepare(&args.tool, &values)?;

    match args.format {
        OutputFormat::Text => {
            println!("{}", prepared.rendered_command());
            for list in &prepared.plan.list_files {
                println!("# list file {}:", list.path.display());
                for entry in &list.entries {
                    println!("#   {}", entry.display());
                }
            }
            for (key, path) in &prepared.plan.outputs {
                println!("# {} -> {}", key, path.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan_json(&prepared))?);
        }
    }
    Ok(())
}

fn plan_json(prepared: &PreparedInvocation) -> serde_json::Value {
    json!({
        "invocation_id": prepared.invocation_id,
        "tool": prepared.tool.id,
        "command": prepared.rendered_command(),
        "tokens": prepared.plan.command.tokens(),
        "list_files": prepared.plan.list_files,
        "outputs": prepared.plan.outputs,
        "launch": prepared.plan.launch,
    })
}

/// Runs one tool and returns the process exit code for its status.
pub async fn run(args: RunArgs, config_path: Option<&Path>) -> Result<i32> {
    let config = effective_config(config_path, args.install_dir)?;
    let mut settings = ExecutionSettings::from_config(&config)?;
    if args.verbose {
        settings.verbose = true;
    }
    if args.timeout.is_some() {
        settings.timeout = args.timeout;
    }

    let executor = FusionExecutor::new(settings, ToolRegistry::builtin());
    let values = load_values(&args.params)?;
    let prepared = executor.prepare(&args.tool, &values)?;

    let (handle, cancel) = cancel_pair();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping FUSION tool");
            handle.cancel();
        }
    });

    let outcome = match args.format {
        OutputFormat::Text => {
            let sink = ConsoleSink::stdout();
            executor.run_prepared(&prepared, &sink, &cancel).await
        }
        OutputFormat::Json => executor.run_prepared(&prepared, &TracingSink, &cancel).await,
    };
    interrupt.abort();
    let result = outcome?;

    match args.format {
        OutputFormat::Text => print_result(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(result.status.exit_code())
}

fn print_result(result: &ExecutionResult) {
    println!();
    println!("Status: {}", result.status);
    if let Some(code) = result.exit_code {
        println!("Exit code: {}", code);
    }
    println!("Duration: {} ms", result.duration_ms);
    if result.is_success() {
        for (key, path) in &result.outputs {
            println!("Output {}: {}", key, path.display());
        }
    }
}

pub fn config(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    ConfigValidator::validate(&config)?;
    let warnings = ConfigValidator::warnings(&config);

    match args.format {
        OutputFormat::Text => {
            if let Some(path) = config_path
                .map(Path::to_path_buf)
                .or_else(ConfigLoader::default_path)
            {
                println!("# config file: {}", path.display());
            }
            print!("{}", toml::to_string_pretty(&config)?);
            for warning in &warnings {
                println!("# warning: {}", warning);
            }
            println!("\n# environment variables:");
            for line in ConfigLoader::env_var_documentation() {
                println!("#   {}", line);
            }
        }
        OutputFormat::Json => {
            let payload = json!({
                "config": config,
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

/// Config file plus env overrides, then the `--install-dir` override.
fn effective_config(config_path: Option<&Path>, install_dir: Option<PathBuf>) -> Result<FusionConfig> {
    let mut config = ConfigLoader::load(config_path)?;
    if let Some(directory) = install_dir {
        config.install.directory = directory;
    }
    ConfigValidator::validate(&config)?;
    for warning in ConfigValidator::warnings(&config) {
        tracing::warn!("{}", warning);
    }
    Ok(config)
}

/// Parameter file values overlaid with `--param` entries.
fn load_values(args: &ParamArgs) -> Result<ParameterValues> {
    let mut values = match &args.params_file {
        Some(path) => load_file(path).map_err(|err| {
            let mut app = AppError::new(
                ErrorCategory::SerializationError,
                format!("failed to load parameter file: {:#}", err),
            )
            .with_code("FUS-SER-001")
            .with_suggestion("Parameter files are JSON objects, or YAML maps when named *.yaml or *.yml");
            app.add_context("path", &path.display().to_string());
            app
        })?,
        None => ParameterValues::new(),
    };
    for (key, value) in &args.params {
        values.insert(key.clone(), value.clone());
    }
    Ok(values)
}
