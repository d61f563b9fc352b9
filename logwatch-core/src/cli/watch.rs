use super::WatchArgs;
use crate::conf::MonitorConfig;
use crate::monitor::{Monitor, RunStats};
use crate::shutdown::ShutdownHandle;
use crate::sink::stdout_sink;
use crate::source::CsvTailSource;
use anyhow::Context;

/// Follow the configured input until Ctrl-C / SIGTERM.
pub async fn watch(args: WatchArgs, config: MonitorConfig) -> anyhow::Result<RunStats> {
    let shutdown = ShutdownHandle::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = shutdown.install_signal_handler().await {
                tracing::error!(error = %e, "failed to install signal handler");
            }
        }
    });

    let monitor = Monitor::new(&config, stdout_sink(args.output));

    match &args.file {
        Some(path) => {
            let source = CsvTailSource::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            tracing::info!(file = %path.display(), "following access log");
            monitor.run(source, &shutdown).await
        }
        None => {
            tracing::info!("reading access log from stdin");
            monitor.run(CsvTailSource::stdin(), &shutdown).await
        }
    }
}
