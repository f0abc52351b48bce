use once_cell::sync::Lazy;
use protox::{define_fields, Field, FieldValidationError, MessageType};

use crate::macros::message_wrapper;
use crate::set_in;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLISECOND: i64 = 1_000_000;
const MILLIS_PER_SECOND: i64 = 1_000;

pub(crate) static DURATION: Lazy<MessageType> = Lazy::new(|| MessageType::new("Duration"));

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(
        &DURATION,
        [("seconds", Field::int64(1)), ("nanos", Field::int32(2))],
    )
}

message_wrapper! {
    /// A signed span of time, as a count of seconds and nanoseconds.
    Duration, DURATION
}

impl Duration {
    pub fn from_parts(seconds: i64, nanos: i32) -> Duration {
        let mut duration = Duration::new();
        duration.set_seconds(seconds);
        duration.set_nanos(nanos);
        duration
    }

    pub fn from_seconds(seconds: i64) -> Duration {
        Duration::from_parts(seconds, 0)
    }

    pub fn from_millis(millis: i64) -> Duration {
        Duration::from_parts(
            millis.div_euclid(MILLIS_PER_SECOND),
            (millis.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLISECOND) as i32,
        )
    }

    pub fn from_nanos(nanos: i64) -> Duration {
        Duration::from_parts(
            nanos.div_euclid(NANOS_PER_SECOND),
            nanos.rem_euclid(NANOS_PER_SECOND) as i32,
        )
    }

    pub fn seconds(&self) -> i64 {
        self.msg.get_i64("seconds").unwrap_or(0)
    }

    pub fn set_seconds(&mut self, seconds: i64) {
        set_in(&mut self.msg, "seconds", seconds);
    }

    pub fn nanos(&self) -> i32 {
        self.msg.get_i32("nanos").unwrap_or(0)
    }

    pub fn set_nanos(&mut self, nanos: i32) {
        set_in(&mut self.msg, "nanos", nanos);
    }

    pub fn to_nanos(&self) -> i64 {
        self.seconds() * NANOS_PER_SECOND + i64::from(self.nanos())
    }

    pub fn to_millis(&self) -> i64 {
        self.to_nanos() / NANOS_PER_MILLISECOND
    }
}
