use clap::{Parser, Subcommand};
use logwatch_core::cli::{self, ConfigArgs, WatchArgs};
use logwatch_core::logging::{LogFormat, init_logging};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "logwatch",
    version,
    about = "logwatch: access-log traffic reports and rate alerts",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Diagnostics format on stderr
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    watch: WatchArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow an access log and print reports and alerts (default)
    Watch(WatchArgs),

    /// Validate configuration and exit
    Check(ConfigArgs),
}

const EXIT_INVALID_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match cli.command {
        Some(Command::Check(args)) => match cli::check(&args) {
            Ok(_) => ExitCode::SUCCESS,
            Err(_) => ExitCode::from(EXIT_INVALID_CONFIG),
        },
        Some(Command::Watch(args)) => run_watch(args),
        None => run_watch(cli.watch),
    }
}

fn run_watch(args: WatchArgs) -> ExitCode {
    let config = match args.config.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            cli::print_config_error(&e);
            return ExitCode::from(EXIT_INVALID_CONFIG);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to build Tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(cli::watch(args, config));

    // The reader thread may still be blocked on stdin; don't wait for it.
    runtime.shutdown_background();

    match result {
        Ok(stats) => {
            tracing::info!(
                processed = stats.processed,
                rejected = stats.rejected,
                reports = stats.reports,
                alerts = stats.alerts,
                "logwatch stopped"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("logwatch error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
