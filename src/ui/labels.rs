//! Clock and date label text

use core::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::config::HourFormat;

/// Buffer length sufficient for every label
pub const BUF_LEN: usize = 16;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Hour as `%H` (24h) or `%I` (12h)
pub fn format_hours<'a>(
    buf: &'a mut [u8],
    time: &NaiveDateTime,
    format: HourFormat,
) -> Result<&'a str, fmt::Error> {
    let hour = match format {
        HourFormat::TwentyFourHour => time.hour(),
        HourFormat::TwelveHour => time.hour12().1,
    };
    format_no_std::show(buf, format_args!("{:02}", hour))
}

/// Minute as `%M`
pub fn format_minutes<'a>(buf: &'a mut [u8], time: &NaiveDateTime) -> Result<&'a str, fmt::Error> {
    format_no_std::show(buf, format_args!("{:02}", time.minute()))
}

/// Date as `%a %d %b`, e.g. `Sun 03 Mar`
pub fn format_date<'a>(buf: &'a mut [u8], time: &NaiveDateTime) -> Result<&'a str, fmt::Error> {
    let month = MONTHS.get(time.month0() as usize).ok_or(fmt::Error)?;
    format_no_std::show(
        buf,
        format_args!(
            "{} {:02} {}",
            weekday_abbrev(time.weekday()),
            time.day(),
            month
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn hours_24h() {
        let mut buf = [0u8; BUF_LEN];
        let time = at(2024, 3, 3, 7, 5);
        assert_eq!(format_hours(&mut buf, &time, HourFormat::TwentyFourHour), Ok("07"));

        let time = at(2024, 3, 3, 0, 0);
        assert_eq!(format_hours(&mut buf, &time, HourFormat::TwentyFourHour), Ok("00"));

        let time = at(2024, 3, 3, 23, 59);
        assert_eq!(format_hours(&mut buf, &time, HourFormat::TwentyFourHour), Ok("23"));
    }

    #[test]
    fn hours_12h() {
        let mut buf = [0u8; BUF_LEN];
        let midnight = at(2024, 3, 3, 0, 0);
        assert_eq!(format_hours(&mut buf, &midnight, HourFormat::TwelveHour), Ok("12"));

        let noon = at(2024, 3, 3, 12, 0);
        assert_eq!(format_hours(&mut buf, &noon, HourFormat::TwelveHour), Ok("12"));

        let evening = at(2024, 3, 3, 19, 0);
        assert_eq!(format_hours(&mut buf, &evening, HourFormat::TwelveHour), Ok("07"));
    }

    #[test]
    fn minutes() {
        let mut buf = [0u8; BUF_LEN];
        assert_eq!(format_minutes(&mut buf, &at(2024, 3, 3, 7, 5)), Ok("05"));
        assert_eq!(format_minutes(&mut buf, &at(2024, 3, 3, 7, 59)), Ok("59"));
    }

    #[test]
    fn date() {
        let mut buf = [0u8; BUF_LEN];
        assert_eq!(format_date(&mut buf, &at(2024, 3, 3, 7, 5)), Ok("Sun 03 Mar"));
        assert_eq!(format_date(&mut buf, &at(2026, 10, 17, 0, 0)), Ok("Sat 17 Oct"));
        assert_eq!(format_date(&mut buf, &at(2025, 12, 31, 0, 0)), Ok("Wed 31 Dec"));
    }

    #[test]
    fn small_buffer_is_an_error() {
        let mut buf = [0u8; 4];
        assert!(format_date(&mut buf, &at(2024, 3, 3, 7, 5)).is_err());
    }
}
