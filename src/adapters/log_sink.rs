//! Event sink that renders loop events through the `log` facade.

use log::{debug, error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::Branch;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { angle } => {
                info!("tracker started at {angle}°");
            }
            AppEvent::Position {
                angle,
                decision,
                branch,
            } => {
                let branch = match branch {
                    Branch::Centering => "centering",
                    Branch::Inference => "inference",
                };
                debug!(
                    "tick: {:?} duty={} ({branch}) → {angle}°",
                    decision.direction,
                    decision.applied_duty()
                );
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "telemetry: angle={}° ticks={} faults sensor={} classifier={} log={}",
                    t.angle, t.total_ticks, t.sensor_faults, t.classifier_faults, t.log_faults
                );
            }
            AppEvent::SensorFaulted { fault, consecutive } => {
                warn!("sensor fault ({fault}), consecutive={consecutive}, holding position");
            }
            AppEvent::ClassifierFellBack(fault) => {
                warn!("classifier fault ({fault}), holding this tick");
            }
            AppEvent::LogDegraded { fault, total } => {
                warn!("sample log degraded ({fault}), {total} samples lost so far");
            }
            AppEvent::Halted(reason) => {
                error!("loop halted: {reason:?}");
            }
        }
    }
}
