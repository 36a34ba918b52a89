//! Port implementations backed by real resources.

pub mod csv_log;
pub mod hardware;
pub mod log_sink;
pub mod time;

pub use csv_log::CsvSampleLog;
pub use hardware::HardwareAdapter;
pub use log_sink::LogEventSink;
pub use time::SystemClock;
