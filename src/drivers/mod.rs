//! Hardware drivers.
//!
//! `hal` is the only module that touches real peripherals; `motor` builds
//! the H-bridge actuator on top of it.

pub mod hal;
pub mod motor;
