//! Watchface configuration

use chrono::{NaiveDateTime, TimeDelta};

/// Clock style of the hour label
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 00–23
    TwentyFourHour,
    /// 01–12
    TwelveHour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchfaceConfig {
    /// Clock style of the hour label
    pub hour_format: HourFormat,
    /// Offset of the local time zone to UTC in seconds
    pub utc_offset_secs: i32,
    /// Vibrate when the phone connection is lost
    pub vibrate_on_disconnect: bool,
    /// Number of vibration pulses for the disconnect alert
    pub disconnect_pulses: u8,
    /// Backlight brightness level (0–7)
    pub backlight_level: u8,
}

impl WatchfaceConfig {
    /// Default configuration, usable in constants.
    pub const fn new() -> Self {
        Self {
            hour_format: HourFormat::TwentyFourHour,
            utc_offset_secs: 0,
            vibrate_on_disconnect: true,
            disconnect_pulses: 2,
            backlight_level: 2,
        }
    }

    /// Convert a UTC time to local time.
    ///
    /// Returns the UTC time unchanged if the offset would overflow the
    /// representable date range.
    pub fn local_time(&self, utc: NaiveDateTime) -> NaiveDateTime {
        utc.checked_add_signed(TimeDelta::seconds(self.utc_offset_secs as i64))
            .unwrap_or(utc)
    }
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn local_time_applies_offset() {
        let utc = NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        let config = WatchfaceConfig {
            utc_offset_secs: 3_600,
            ..Default::default()
        };

        let local = config.local_time(utc);
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 30);
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn negative_offset() {
        let utc = NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(2, 0, 0)
            .unwrap();
        let config = WatchfaceConfig {
            utc_offset_secs: -5 * 3_600,
            ..Default::default()
        };
        assert_eq!(config.local_time(utc).hour(), 21);
    }

    #[test]
    fn default_is_24h_utc() {
        let config = WatchfaceConfig::default();
        assert_eq!(config.hour_format, HourFormat::TwentyFourHour);
        assert_eq!(config.utc_offset_secs, 0);
    }
}
