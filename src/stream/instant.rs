use chrono::{DateTime, Utc};
use std::fmt;
use std::fmt::{Display, Formatter};

pub const MAX_NANOS: i64 = 999_999_999;

/// A point in time as written by the platform: epoch seconds plus a nanosecond adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant {
    pub epoch_seconds: i64,
    pub nanos: i64
}

impl Instant {
    pub fn new(epoch_seconds: i64, nanos: i64) -> Self {
        Self { epoch_seconds, nanos }
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        u32::try_from(self.nanos).ok()
            .and_then(|nanos| DateTime::from_timestamp(self.epoch_seconds, nanos))
    }
}

impl Display for Instant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(formatter, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ")),
            None => write!(formatter, "{}.{:09}", self.epoch_seconds, self.nanos)
        }
    }
}
