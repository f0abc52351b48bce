use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use protox::{define_fields, Field, FieldValidationError, MessageType};
use thiserror::Error;

use crate::datetime;
use crate::macros::message_wrapper;
use crate::set_in;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLISECOND: i64 = 1_000_000;
const NANOS_PER_MICROSECOND: i64 = 1_000;
const MILLIS_PER_SECOND: i64 = 1_000;
const MICROS_PER_SECOND: i64 = 1_000_000;

pub(crate) static TIMESTAMP: Lazy<MessageType> = Lazy::new(|| MessageType::new("Timestamp"));

pub(crate) fn register() -> Result<(), FieldValidationError> {
    define_fields(
        &TIMESTAMP,
        [("seconds", Field::int64(1)), ("nanos", Field::int32(2))],
    )
}

/// Raised when an RFC 3339 string cannot be read back as a [`Timestamp`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("failed to parse RFC 3339 timestamp {input:?}")]
pub struct TimestampError {
    pub input: String,
}

message_wrapper! {
    /// A point on the UTC timeline, as seconds and nanoseconds since the
    /// Unix epoch.
    Timestamp, TIMESTAMP
}

impl Timestamp {
    pub fn from_parts(seconds: i64, nanos: i32) -> Timestamp {
        let mut timestamp = Timestamp::new();
        timestamp.set_seconds(seconds);
        timestamp.set_nanos(nanos);
        timestamp
    }

    pub fn from_seconds(seconds: i64) -> Timestamp {
        Timestamp::from_parts(seconds, 0)
    }

    pub fn from_milliseconds(millis: i64) -> Timestamp {
        Timestamp::from_parts(
            millis.div_euclid(MILLIS_PER_SECOND),
            (millis.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLISECOND) as i32,
        )
    }

    pub fn from_microseconds(micros: i64) -> Timestamp {
        Timestamp::from_parts(
            micros.div_euclid(MICROS_PER_SECOND),
            (micros.rem_euclid(MICROS_PER_SECOND) * NANOS_PER_MICROSECOND) as i32,
        )
    }

    pub fn from_nanoseconds(nanos: i64) -> Timestamp {
        Timestamp::from_parts(
            nanos.div_euclid(NANOS_PER_SECOND),
            nanos.rem_euclid(NANOS_PER_SECOND) as i32,
        )
    }

    pub fn now() -> Timestamp {
        Timestamp::from(SystemTime::now())
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

    pub fn to_seconds(&self) -> i64 {
        self.seconds()
    }

    pub fn to_milliseconds(&self) -> i64 {
        self.seconds() * MILLIS_PER_SECOND + i64::from(self.nanos()) / NANOS_PER_MILLISECOND
    }

    pub fn to_microseconds(&self) -> i64 {
        self.seconds() * MICROS_PER_SECOND + i64::from(self.nanos()) / NANOS_PER_MICROSECOND
    }

    pub fn to_nanoseconds(&self) -> i64 {
        self.seconds() * NANOS_PER_SECOND + i64::from(self.nanos())
    }

    /// The ISO-8601 / RFC 3339 rendering in UTC, e.g.
    /// `1972-01-01T10:00:20.021Z`. Out-of-range nanoseconds are folded into
    /// the seconds before formatting.
    pub fn to_rfc3339(&self) -> String {
        let nanos = i64::from(self.nanos());
        let carry = nanos.div_euclid(NANOS_PER_SECOND);
        let nanos = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
        datetime::format_rfc3339(self.seconds() + carry, nanos)
    }

    /// Reads an RFC 3339 string, honoring `Z` and `±HH:MM` offsets.
    pub fn from_rfc3339(input: &str) -> Result<Timestamp, TimestampError> {
        match datetime::parse_rfc3339(input) {
            Some((seconds, nanos)) => Ok(Timestamp::from_parts(seconds, nanos as i32)),
            None => Err(TimestampError {
                input: input.to_string(),
            }),
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Timestamp {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Timestamp::from_parts(since.as_secs() as i64, since.subsec_nanos() as i32),
            Err(before) => {
                let duration = before.duration();
                let mut seconds = -(duration.as_secs() as i64);
                let mut nanos = duration.subsec_nanos() as i64;
                if nanos > 0 {
                    seconds -= 1;
                    nanos = NANOS_PER_SECOND - nanos;
                }
                Timestamp::from_parts(seconds, nanos as i32)
            }
        }
    }
}
