//! Application layer: the loop core and the port traits it drives.

pub mod events;
pub mod ports;
pub mod service;

pub use events::{AppEvent, HaltReason, TelemetryData};
pub use service::{LoopState, TrackerService};
