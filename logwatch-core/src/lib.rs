pub mod alert;
pub mod cli;
pub mod conf;
pub mod event;
pub mod history;
pub mod logging;
pub mod monitor;
pub mod record;
pub mod report;
pub mod shutdown;
pub mod sink;
pub mod source;

pub use conf::MonitorConfig;
pub use event::MonitorEvent;
pub use monitor::{Monitor, RunStats};
pub use shutdown::ShutdownHandle;
