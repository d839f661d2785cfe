use clap::Parser;
use fusion_processing::cli::{self, Args};
use fusion_processing::core::{AppError, DefaultErrorReporter, ErrorReporter};
use fusion_processing::logging;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let logging_guard = match logging::init(&args.command, args.config.as_deref()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            DefaultErrorReporter.report_warning("logging disabled", Some(format!("{:#}", err)));
            None
        }
    };

    let code = match cli::run(args).await {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => DefaultErrorReporter.report_error(app_error),
                None => eprintln!("Error: {:#}", err),
            }
            1
        }
    };

    // Flush the file writer before exiting.
    drop(logging_guard);
    std::process::exit(code);
}
