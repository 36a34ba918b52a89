//! Loop events.
//!
//! The service reports everything observable through these values rather
//! than logging directly, so tests can assert on exactly what happened
//! and the binary can render them however it likes.

use crate::control::{Branch, Decision};
use crate::error::{ActuatorFault, ClassifierFault, LogFault, SensorFault};

/// Why the loop stopped issuing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// A motor command failed; the bridge state is unverifiable.
    ActuatorFailed(ActuatorFault),
    /// Consecutive sensor failures exceeded the configured bound.
    SensorRetriesExhausted,
}

/// Periodic health snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    pub angle: u8,
    pub total_ticks: u64,
    pub sensor_faults: u64,
    pub classifier_faults: u64,
    pub log_faults: u64,
}

/// Everything the loop reports to the outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Loop started with this initial angle.
    Started { angle: u8 },
    /// A tick completed: command applied and angle updated.
    Position {
        angle: u8,
        decision: Decision,
        branch: Branch,
    },
    /// Periodic health snapshot.
    Telemetry(TelemetryData),
    /// A sensor read failed; the panel holds position this tick.
    SensorFaulted { fault: SensorFault, consecutive: u32 },
    /// The classifier failed and the tick fell back to a hold command.
    ClassifierFellBack(ClassifierFault),
    /// A training sample could not be written; control is unaffected.
    LogDegraded { fault: LogFault, total: u64 },
    /// The loop has stopped issuing commands.
    Halted(HaltReason),
}
