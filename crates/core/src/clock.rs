//! Time source for synthesized timestamps and ids.
//!
//! The generator reads the clock once per message. Injecting a [`FixedClock`] makes the
//! output reproducible.

use crate::constants::HL7_TIMESTAMP_FORMAT;
use chrono::{Local, NaiveDateTime};

pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current time as an HL7 timestamp, `YYYYMMDDHHMMSS`.
    fn hl7_timestamp(&self) -> String {
        self.now().format(HL7_TIMESTAMP_FORMAT).to_string()
    }
}

/// The process's local clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
