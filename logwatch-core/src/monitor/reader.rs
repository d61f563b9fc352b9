use crate::source::{RawRecord, RecordSource, SourceError};
use std::io;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

/// Pull records on a dedicated thread and hand them to the monitor.
///
/// The thread stops once the receiver is gone, checked on every send and on every idle
/// backoff. A read blocked inside the source is not interrupted; the thread is simply left
/// behind when the process exits.
pub fn spawn_reader<R: RecordSource>(
    mut source: R,
    backoff: Duration,
) -> io::Result<mpsc::UnboundedReceiver<RawRecord>> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("logwatch-reader".into())
        .spawn(move || {
            loop {
                match source.next_record() {
                    Ok(raw) => {
                        if tx.send(raw).is_err() {
                            break;
                        }
                    }
                    Err(SourceError::NoData) => {
                        if tx.is_closed() {
                            break;
                        }
                        thread::sleep(backoff);
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "dropping unreadable record");
                    }
                }
            }
            tracing::debug!("reader stopped");
        })?;

    Ok(rx)
}
