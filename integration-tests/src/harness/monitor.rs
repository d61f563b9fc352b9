use logwatch_core::sink::MemorySink;
use logwatch_core::source::RecordSource;
use logwatch_core::{Monitor, MonitorConfig, MonitorEvent, RunStats, ShutdownHandle};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A monitor running on the test runtime, writing into a shared [`MemorySink`].
pub struct RunningMonitor {
    pub sink: MemorySink,
    shutdown: ShutdownHandle,
    task: JoinHandle<RunStats>,
}

impl RunningMonitor {
    pub fn start<R: RecordSource>(config: &MonitorConfig, source: R) -> Self {
        config.validate().expect("test config must be valid");

        let sink = MemorySink::new();
        let shutdown = ShutdownHandle::new();
        let monitor = Monitor::new(config, sink.clone());

        let task = tokio::spawn({
            let shutdown = shutdown.clone();
            async move {
                monitor
                    .run(source, &shutdown)
                    .await
                    .expect("monitor failed to start")
            }
        });

        Self {
            sink,
            shutdown,
            task,
        }
    }

    pub fn events(&self) -> Vec<MonitorEvent> {
        self.sink.events()
    }

    pub async fn stop(self) -> RunStats {
        self.shutdown.trigger();
        self.task.await.expect("monitor task panicked")
    }
}

/// Poll `predicate` until it holds or `timeout` passes. Returns whether it held.
pub async fn wait_for(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    predicate()
}
