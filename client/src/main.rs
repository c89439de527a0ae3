use std::process::ExitCode;

use clap::Parser;
use gbaka_client::cli::{self, Cli, Context};
use gbaka_client::config;
use gbaka_client::logging::{self, LogConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match config::init_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let mut log_config = LogConfig::from_env().with_log_dir(&config.log_dir);
    log_config.stderr |= args.verbose;
    let _log_guard = logging::init_logger(&log_config);

    let ctx = Context::new(config, args.json);
    let command = args.command;
    let name = command.name();

    let result = logging::with_trace_id_async(name, move |_| async move {
        ctx.prepare().await;
        cli::run(&ctx, command).await
    })
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, command = name, "Command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
