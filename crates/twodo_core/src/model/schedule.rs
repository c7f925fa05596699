use crate::error::AppError;
use crate::model::RawValue;
use crate::model::raw::is_digits;
use serde::{Serialize, Serializer};
use std::fmt;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// When a task is due or starts: a calendar date, a date with a time of day,
/// or a number of days from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayRef {
    Date(Date),
    DateTime(PrimitiveDateTime),
    Offset(u32),
}

const DUE_EXPECTED: &str = "a date (YYYY-MM-DD) or a number of days";
const START_EXPECTED: &str = "a date (YYYY-MM-DD), a date and time (YYYY-MM-DD HH:MM) or a number of days";

impl DayRef {
    /// Due values carry no time of day; that goes into `dueTime`.
    pub fn parse_due(raw: &RawValue) -> Result<Self, AppError> {
        Self::parse(raw, false).ok_or_else(|| AppError::invalid_field("due", raw, DUE_EXPECTED))
    }

    pub fn parse_start(raw: &RawValue) -> Result<Self, AppError> {
        Self::parse(raw, true).ok_or_else(|| AppError::invalid_field("start", raw, START_EXPECTED))
    }

    fn parse(raw: &RawValue, allow_time: bool) -> Option<Self> {
        match raw {
            RawValue::Bool(_) => None,
            RawValue::Int(days) => u32::try_from(*days).ok().map(Self::Offset),
            RawValue::Text(text) if is_digits(text) => text.parse().ok().map(Self::Offset),
            RawValue::Text(text) => {
                if !has_four_digit_year(text) {
                    return None;
                }
                if let Ok(date) = Date::parse(text, format_description!("[year]-[month]-[day]")) {
                    return Some(Self::Date(date));
                }
                if !allow_time {
                    return None;
                }
                PrimitiveDateTime::parse(
                    text,
                    format_description!("[year]-[month]-[day] [hour]:[minute]"),
                )
                .or_else(|_| {
                    PrimitiveDateTime::parse(
                        text,
                        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
                    )
                })
                .ok()
                .map(Self::DateTime)
            }
        }
    }
}

/// `[year]` also takes a sign or a short year, so the prefix is checked first.
fn has_four_digit_year(text: &str) -> bool {
    text.get(..4).is_some_and(is_digits) && text.as_bytes().get(4) == Some(&b'-')
}

fn write_date(f: &mut fmt::Formatter<'_>, date: Date) -> fmt::Result {
    write!(
        f,
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

impl fmt::Display for DayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write_date(f, *date),
            Self::DateTime(datetime) => {
                write_date(f, datetime.date())?;
                write!(f, " {:02}:{:02}", datetime.hour(), datetime.minute())
            }
            Self::Offset(days) => write!(f, "{days}"),
        }
    }
}

impl Serialize for DayRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Time of day a task is due, 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DueTime(Time);

impl DueTime {
    /// Accepts `H:MM` or `HH:MM`.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let invalid = || AppError::invalid_field("due_time", text, "a 24-hour time (HH:MM)");

        let (hour, minute) = text.split_once(':').ok_or_else(invalid)?;
        if !is_digits(hour) || hour.len() > 2 || !is_digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Time::from_hms(hour, minute, 0)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn time(self) -> Time {
        self.0
    }
}

impl fmt::Display for DueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for DueTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{DayRef, DueTime};
    use crate::model::RawValue;
    use time::macros::{date, datetime};

    #[test]
    fn due_accepts_iso_dates_and_offsets() {
        assert_eq!(
            DayRef::parse_due(&RawValue::from("2015-10-15")).unwrap(),
            DayRef::Date(date!(2015 - 10 - 15))
        );
        assert_eq!(
            DayRef::parse_due(&RawValue::from("14")).unwrap(),
            DayRef::Offset(14)
        );
        assert_eq!(
            DayRef::parse_due(&RawValue::from(14)).unwrap().to_string(),
            "14"
        );
        assert_eq!(
            DayRef::parse_due(&RawValue::from("0")).unwrap(),
            DayRef::Offset(0)
        );
    }

    #[test]
    fn due_rejects_other_formats() {
        for text in [
            "2015-XX-10",
            "15.10.2015",
            "2015......",
            "2015-02-30",
            "2015-10-01 12:00",
            "-3",
            "+2015-10-02",
            "-0001-01-01",
            "",
            "tomorrow",
        ] {
            let err = DayRef::parse_due(&RawValue::from(text)).unwrap_err();
            assert_eq!(err.code(), "invalid_input", "accepted {text:?}");
        }
        assert!(DayRef::parse_due(&RawValue::from(-1)).is_err());
        assert!(DayRef::parse_due(&RawValue::from(true)).is_err());
    }

    #[test]
    fn start_accepts_datetimes() {
        let parsed = DayRef::parse_start(&RawValue::from("2015-10-01 12:00")).unwrap();
        assert_eq!(parsed, DayRef::DateTime(datetime!(2015-10-01 12:00)));
        assert_eq!(parsed.to_string(), "2015-10-01 12:00");

        let with_t = DayRef::parse_start(&RawValue::from("2015-10-01T08:05")).unwrap();
        assert_eq!(with_t.to_string(), "2015-10-01 08:05");

        assert_eq!(
            DayRef::parse_start(&RawValue::from("2015-10-01")).unwrap().to_string(),
            "2015-10-01"
        );
        assert!(DayRef::parse_start(&RawValue::from("2015-10-01 25:00")).is_err());
    }

    #[test]
    fn start_rejects_other_formats() {
        for text in [
            "2015-XX-10",
            "15.10.2015",
            "-3",
            "+2015-10-01 12:00",
            "-0001-01-01",
            "015-10-01",
            "2015-10-01 12",
        ] {
            let err = DayRef::parse_start(&RawValue::from(text)).unwrap_err();
            assert_eq!(err.code(), "invalid_input", "accepted {text:?}");
        }
    }

    #[test]
    fn due_time_accepts_24_hour_clock() {
        assert_eq!(DueTime::parse("12:00").unwrap().to_string(), "12:00");
        assert_eq!(DueTime::parse("8:30").unwrap().to_string(), "08:30");
        assert_eq!(DueTime::parse("23:59").unwrap().time().hour(), 23);
    }

    #[test]
    fn due_time_rejects_other_formats() {
        for text in ["8pm", "24:00", "12:60", "12:0", "123:00", "12", "", "12:00:00"] {
            assert!(DueTime::parse(text).is_err(), "accepted {text:?}");
        }
    }
}
