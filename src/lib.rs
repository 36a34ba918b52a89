//! Heliotrack — closed-loop dual-axis solar tracker controller.
//!
//! Two light-dependent resistors face opposite sides of the panel.  A
//! fixed-cadence control loop reads them, picks a movement via a
//! deterministic centering rule or a learned classifier, drives the
//! panel motor through an H-bridge, and appends every decision to a CSV
//! training log that an out-of-process trainer consumes to produce
//! better models.
//!
//! ## Layering
//!
//! * [`control`] — pure decision engine and angle state, no I/O.
//! * [`app`] — the loop core ([`app::TrackerService`]) and the port
//!   traits it consumes.
//! * [`sensors`], [`drivers`] — LDR and H-bridge drivers over the
//!   dual-target HAL shim (real GPIO behind the `rpi-hw` feature,
//!   in-memory simulation otherwise).
//! * [`adapters`] — port implementations binding the loop to the
//!   drivers, the CSV log, the system clock, and the `log` facade.
//! * [`inference`] — classifier implementations and hot-reload.

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod datalog;
pub mod drivers;
pub mod error;
pub mod inference;
pub mod sensors;
pub mod shutdown;

mod pins;

pub use config::TrackerConfig;
pub use error::{Error, Result};
