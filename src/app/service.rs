//! Control-loop core.
//!
//! One [`tick`](TrackerService::tick) walks four phases in order:
//!
//! ```text
//!   Sensing → Deciding → Actuating → Logging
//! ```
//!
//! and each phase has a fixed fault policy:
//!
//! * **Sensing** faults end the tick (hold position), retried up to
//!   `max_sensor_retries` consecutive failures, then the loop halts.
//! * **Deciding** faults never escape the engine; a classifier failure
//!   arrives as a hold command plus a fault tag and is only counted here.
//! * **Actuating** faults halt the loop immediately: the bridge state is
//!   unverifiable, so no further commands are issued.
//! * **Logging** faults are counted and reported; the tick's control
//!   behaviour is already complete and stands.
//!
//! The service owns no I/O.  Everything effectful comes in through the
//! port traits, which is what makes the loop testable tick-by-tick.

use crate::config::TrackerConfig;
use crate::control::{DecisionEngine, TrackerState};
use crate::datalog::TrainingSample;

use super::events::{AppEvent, HaltReason, TelemetryData};
use super::ports::{ActuatorPort, ClassifierPort, Clock, EventSink, SampleLog, SensorPort};

/// Whether the loop is still issuing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal.  A halted loop never resumes within the process.
    Halted(HaltReason),
}

#[derive(Debug, Clone, Copy, Default)]
struct FaultCounters {
    sensor: u64,
    classifier: u64,
    log: u64,
}

pub struct TrackerService {
    engine: DecisionEngine,
    state: TrackerState,
    loop_state: LoopState,
    consecutive_sensor_faults: u32,
    max_sensor_retries: u32,
    counters: FaultCounters,
    tick_count: u64,
    /// Ticks between telemetry snapshots; 0 disables telemetry.
    telemetry_every: u64,
}

impl TrackerService {
    pub fn new(config: &TrackerConfig) -> Self {
        let telemetry_every = u64::from(config.telemetry_interval_secs)
            .saturating_mul(1000)
            / u64::from(config.control_loop_interval_ms);
        Self {
            engine: DecisionEngine::new(config),
            state: TrackerState::new(config.initial_angle_deg),
            loop_state: LoopState::Running,
            consecutive_sensor_faults: 0,
            max_sensor_retries: config.max_sensor_retries,
            counters: FaultCounters::default(),
            tick_count: 0,
            telemetry_every,
        }
    }

    /// Announce the loop's starting position.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            angle: self.state.angle(),
        });
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn angle(&self) -> u8 {
        self.state.angle()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one control cycle.  Returns the loop state afterwards so the
    /// caller can stop driving a halted loop.
    pub fn tick<H, L, S, C>(
        &mut self,
        hw: &mut H,
        classifier: &dyn ClassifierPort,
        log: &mut L,
        clock: &C,
        sink: &mut S,
    ) -> LoopState
    where
        H: SensorPort + ActuatorPort,
        L: SampleLog,
        S: EventSink,
        C: Clock,
    {
        if let LoopState::Halted(_) = self.loop_state {
            return self.loop_state;
        }
        self.tick_count += 1;

        // ── Sensing ─────────────────────────────────────────────
        let reading = match hw.read() {
            Ok(r) => {
                self.consecutive_sensor_faults = 0;
                r
            }
            Err(fault) => {
                self.counters.sensor += 1;
                self.consecutive_sensor_faults += 1;
                sink.emit(&AppEvent::SensorFaulted {
                    fault,
                    consecutive: self.consecutive_sensor_faults,
                });
                if self.consecutive_sensor_faults >= self.max_sensor_retries {
                    return self.halt(hw, sink, HaltReason::SensorRetriesExhausted);
                }
                // Hold position this tick; no sample is logged for a
                // tick that never observed the world.
                return self.loop_state;
            }
        };

        // ── Deciding ────────────────────────────────────────────
        let outcome = self.engine.decide(reading, self.state.angle(), classifier);
        if let Some(fault) = outcome.classifier_fault {
            self.counters.classifier += 1;
            sink.emit(&AppEvent::ClassifierFellBack(fault));
        }

        // ── Actuating ───────────────────────────────────────────
        if let Err(fault) = hw.apply(&outcome.decision) {
            return self.halt(hw, sink, HaltReason::ActuatorFailed(fault));
        }
        self.state.advance(outcome.decision.direction);

        // ── Logging ─────────────────────────────────────────────
        let sample = TrainingSample {
            timestamp: clock.now_unix(),
            a: reading.a,
            b: reading.b,
            angle: self.state.angle(),
            direction: outcome.decision.direction,
        };
        if let Err(fault) = log.append(&sample) {
            self.counters.log += 1;
            sink.emit(&AppEvent::LogDegraded {
                fault,
                total: self.counters.log,
            });
        }

        sink.emit(&AppEvent::Position {
            angle: self.state.angle(),
            decision: outcome.decision,
            branch: outcome.branch,
        });

        if self.telemetry_every > 0 && self.tick_count % self.telemetry_every == 0 {
            sink.emit(&AppEvent::Telemetry(self.telemetry()));
        }

        self.loop_state
    }

    fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            angle: self.state.angle(),
            total_ticks: self.tick_count,
            sensor_faults: self.counters.sensor,
            classifier_faults: self.counters.classifier,
            log_faults: self.counters.log,
        }
    }

    fn halt(
        &mut self,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
        reason: HaltReason,
    ) -> LoopState {
        hw.all_off();
        self.loop_state = LoopState::Halted(reason);
        sink.emit(&AppEvent::Halted(reason));
        self.loop_state
    }
}
