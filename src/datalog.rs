//! Training-sample records and their CSV wire format.
//!
//! One line per tick, no header, no rotation:
//!
//! ```text
//! unix_timestamp,a,b,angle,direction_code
//! ```
//!
//! The direction code is the training label the offline trainer consumes
//! (Hold=0, Left=1, Right=2 — fixed in [`Direction::code`]), so the
//! mapping must never change.  `to_line` and `parse_line` are inverse for
//! the `(a, b, angle, direction_code)` tuple.

use crate::control::Direction;

/// One durable log record: the tick's observation and decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub a: f32,
    pub b: f32,
    /// Panel angle after the tick's update (degrees).
    pub angle: u8,
    pub direction: Direction,
}

impl TrainingSample {
    /// Serialise to one CSV line (no trailing newline).  Float fields use
    /// the shortest round-tripping representation.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.timestamp,
            self.a,
            self.b,
            self.angle,
            self.direction.code()
        )
    }

    /// Parse one CSV line produced by [`to_line`](Self::to_line).
    pub fn parse_line(line: &str) -> Result<Self, &'static str> {
        let mut fields = line.trim_end().split(',');
        let timestamp = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or("bad timestamp field")?;
        let a = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or("bad sensor-a field")?;
        let b = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or("bad sensor-b field")?;
        let angle = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or("bad angle field")?;
        let direction = fields
            .next()
            .and_then(|f| f.parse().ok())
            .and_then(Direction::from_code)
            .ok_or("bad direction code")?;
        if fields.next().is_some() {
            return Err("trailing fields");
        }
        Ok(Self {
            timestamp,
            a,
            b,
            angle,
            direction,
        })
    }
}
