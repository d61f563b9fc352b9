pub mod log_file;
pub mod monitor;
pub mod source;
pub mod tracing;

pub use log_file::{LogFile, csv_line};
pub use monitor::{RunningMonitor, wait_for};
pub use source::ScriptedSource;
pub use tracing::{CapturedEvent, CapturedEvents, init_test_tracing};
