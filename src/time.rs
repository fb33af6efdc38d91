//! Time keeping
//!
//! The wall clock is kept as a reference time together with the system uptime
//! at which it was valid. The current time is the reference plus the uptime
//! elapsed since then.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

/// Length of a Current Time Service characteristic value
pub const CTS_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system uptime
    uptime_secs: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::default(),
            uptime_secs: 0,
        }
    }
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn new(time: NaiveDateTime, uptime_secs: u64) -> Self {
        Self { time, uptime_secs }
    }

    /// Create new time reference from seconds since the Unix epoch
    pub fn from_timestamp(timestamp: i64, uptime_secs: u64) -> Result<Self, Error> {
        let time = DateTime::<Utc>::from_timestamp(timestamp, 0)
            .ok_or(Error::OutOfRange)?
            .naive_utc();
        Ok(Self::new(time, uptime_secs))
    }

    /// Create new time reference from Current Time Service data
    ///
    /// Layout: year (u16 LE), month, day, hours, minutes, seconds,
    /// day of week, fractions of 1/256 s.
    pub fn from_cts_bytes(bytes: &[u8], uptime_secs: u64) -> Result<Self, Error> {
        if bytes.len() < CTS_LEN - 1 {
            return Err(Error::TooShort);
        }

        let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
        let month = bytes[2] as u32;
        let day = bytes[3] as u32;
        let hour = bytes[4] as u32;
        let min = bytes[5] as u32;
        let sec = bytes[6] as u32;
        // Convert fractions_256 to milliseconds
        let milli = bytes[8] as u32 * 1000 / 256;

        let time = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, min, sec, milli))
            .ok_or(Error::InvalidDate)?;

        Ok(Self::new(time, uptime_secs))
    }

    /// Clock time at the given system uptime
    ///
    /// An uptime before the reference yields the reference time itself.
    pub fn now(&self, uptime_secs: u64) -> NaiveDateTime {
        let elapsed = uptime_secs.saturating_sub(self.uptime_secs);
        i64::try_from(elapsed)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| self.time.checked_add_signed(delta))
            .unwrap_or(self.time)
    }
}

/// Minute tick source
///
/// Fed with the current time at any rate, yields once per minute.
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last: Option<NaiveDateTime>,
}

impl MinuteTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the time truncated to the minute if the minute changed since
    /// the last tick. The first poll always ticks.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let minute = now.with_second(0)?.with_nanosecond(0)?;
        if self.last == Some(minute) {
            return None;
        }
        self.last = Some(minute);
        Some(minute)
    }

    /// Force a tick on the next poll, e.g. after the clock was set.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Current Time Service value shorter than expected
    TooShort,
    /// Fields do not form a valid date and time
    InvalidDate,
    /// Timestamp outside the supported range
    OutOfRange,
}
