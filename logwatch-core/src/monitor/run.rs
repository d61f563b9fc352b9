use super::{Monitor, RunStats, spawn_reader};
use crate::shutdown::ShutdownHandle;
use crate::sink::EventSink;
use crate::source::{RawRecord, RecordSource};
use anyhow::Context;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

impl<S: EventSink> Monitor<S> {
    /// Follow `source` until `shutdown` fires.
    pub async fn run<R: RecordSource>(
        self,
        source: R,
        shutdown: &ShutdownHandle,
    ) -> anyhow::Result<RunStats> {
        let records =
            spawn_reader(source, self.read_backoff).context("failed to start reader thread")?;
        Ok(self.run_channel(records, shutdown).await)
    }

    /// Main loop over an already established handoff queue.
    ///
    /// Wakes on whichever comes first: a record, the idle timer, or shutdown. Every record
    /// pushes the idle deadline out by one tick.
    pub async fn run_channel(
        mut self,
        mut records: mpsc::UnboundedReceiver<RawRecord>,
        shutdown: &ShutdownHandle,
    ) -> RunStats {
        let mut stop = shutdown.subscribe();
        let mut reader_open = true;
        let mut last_record_at = Instant::now();

        let idle = sleep(self.idle_tick);
        tokio::pin!(idle);

        tracing::info!(
            window_secs = self.window.as_secs_f64(),
            threshold = self.alert.params().threshold,
            report_interval_secs = self.reporter.interval(),
            "monitor started"
        );

        loop {
            tokio::select! {
                biased;

                _ = stop.wait_for(|stopped| *stopped) => break,

                received = records.recv(), if reader_open => match received {
                    Some(raw) => {
                        self.process_raw(&raw);
                        last_record_at = Instant::now();
                        idle.as_mut().reset(last_record_at + self.idle_tick);
                    }
                    None => {
                        tracing::warn!("record reader stopped; continuing on idle ticks");
                        reader_open = false;
                    }
                },

                _ = &mut idle => {
                    self.on_idle_tick(last_record_at.elapsed());
                    idle.as_mut().reset(Instant::now() + self.idle_tick);
                }
            }
        }

        let stats = self.stats;
        tracing::info!(
            processed = stats.processed,
            rejected = stats.rejected,
            reports = stats.reports,
            alerts = stats.alerts,
            "monitor stopped"
        );
        stats
    }
}
