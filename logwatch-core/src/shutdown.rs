use tokio::sync::watch;

/// Cooperative stop signal shared by the run loop and whoever may stop it.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
        tracing::info!("shutdown signaled");
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Waits for Ctrl-C (or SIGTERM on unix) and triggers shutdown.
    pub async fn install_signal_handler(&self) -> anyhow::Result<()> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut term = signal(SignalKind::terminate())?;
            tokio::select! {
                res = tokio::signal::ctrl_c() => res?,
                _ = term.recv() => tracing::info!("SIGTERM received"),
            }
        }

        #[cfg(not(unix))]
        tokio::signal::ctrl_c().await?;

        self.trigger();
        Ok(())
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}
