//! Wall-clock adapter.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::app::ports::Clock;

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        // A clock before the epoch is a misconfigured RTC; log zeros
        // rather than failing the tick.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
