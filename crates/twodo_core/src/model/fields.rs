//! Enumerated task fields and their wire codes.
//!
//! 2Do identifies task types, priorities and repetition rules by small
//! integers. Each enum here maps to exactly one of those codes and also
//! accepts its lowercase label when parsed.

use crate::error::AppError;
use crate::model::RawValue;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A field whose values are identified by an integer code on the wire.
pub trait CodedField: Sized + Copy + 'static {
    /// Field name used in validation messages.
    const FIELD: &'static str;
    /// Every accepted value, in code order.
    const ALL: &'static [Self];

    fn code(self) -> u8;

    fn label(self) -> &'static str;

    /// Accepts the integer code (as an integer or digit text) or the label.
    fn from_raw(raw: &RawValue) -> Result<Self, AppError> {
        let found = match (raw, raw.as_integer()) {
            (_, Some(code)) => Self::ALL
                .iter()
                .copied()
                .find(|value| i64::from(value.code()) == code),
            (RawValue::Text(text), None) => Self::ALL
                .iter()
                .copied()
                .find(|value| text.eq_ignore_ascii_case(value.label())),
            _ => None,
        };

        found.ok_or_else(|| AppError::invalid_field(Self::FIELD, raw, &expected_codes::<Self>()))
    }
}

fn expected_codes<T: CodedField>() -> String {
    let choices: Vec<String> = T::ALL
        .iter()
        .map(|value| format!("{} ({})", value.code(), value.label()))
        .collect();
    format!("one of {}", choices.join(", "))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    Task,
    Project,
    Checklist,
}

impl CodedField for TaskType {
    const FIELD: &'static str = "type";
    const ALL: &'static [Self] = &[Self::Task, Self::Project, Self::Checklist];

    fn code(self) -> u8 {
        match self {
            Self::Task => 0,
            Self::Project => 1,
            Self::Checklist => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Checklist => "checklist",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl CodedField for Priority {
    const FIELD: &'static str = "priority";
    const ALL: &'static [Self] = &[Self::None, Self::Low, Self::Medium, Self::High];

    fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Repetition rule. An absent rule means the task does not repeat, so there is
/// no "none" value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    Daily,
    Weekdays,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl CodedField for Repeat {
    const FIELD: &'static str = "repeat";
    const ALL: &'static [Self] = &[
        Self::Daily,
        Self::Weekdays,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
        Self::Yearly,
    ];

    fn code(self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::Weekdays => 2,
            Self::Weekly => 3,
            Self::Biweekly => 4,
            Self::Monthly => 5,
            Self::Yearly => 6,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

macro_rules! coded_field_traits {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.code())
                }
            }

            impl FromStr for $ty {
                type Err = AppError;

                fn from_str(value: &str) -> Result<Self, Self::Err> {
                    Self::from_raw(&RawValue::from(value))
                }
            }

            impl TryFrom<RawValue> for $ty {
                type Error = AppError;

                fn try_from(value: RawValue) -> Result<Self, Self::Error> {
                    Self::from_raw(&value)
                }
            }
        )+
    };
}

coded_field_traits!(TaskType, Priority, Repeat);

/// Two-valued switch serialized as `"0"` or `"1"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Flag {
    #[default]
    Off,
    On,
}

impl Flag {
    /// Accepts `true`/`false`, `0`/`1` and `"0"`/`"1"`; everything else is rejected.
    pub fn from_raw(field: &str, raw: &RawValue) -> Result<Self, AppError> {
        match raw {
            RawValue::Bool(value) => Ok(Self::from(*value)),
            RawValue::Int(0) => Ok(Self::Off),
            RawValue::Int(1) => Ok(Self::On),
            RawValue::Text(text) if text == "0" => Ok(Self::Off),
            RawValue::Text(text) if text == "1" => Ok(Self::On),
            other => Err(AppError::invalid_field(
                field,
                other,
                "true, false, 0 or 1",
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{CodedField, Flag, Priority, Repeat, TaskType};
    use crate::model::RawValue;

    #[test]
    fn task_type_accepts_codes_and_labels() {
        assert_eq!("0".parse::<TaskType>().unwrap(), TaskType::Task);
        assert_eq!("1".parse::<TaskType>().unwrap(), TaskType::Project);
        assert_eq!("Checklist".parse::<TaskType>().unwrap(), TaskType::Checklist);
        assert_eq!(
            TaskType::try_from(RawValue::from(2)).unwrap(),
            TaskType::Checklist
        );
    }

    #[test]
    fn task_type_rejects_out_of_range() {
        let err = "4".parse::<TaskType>().unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert!(err.message().contains("invalid type '4'"));
        assert!(TaskType::try_from(RawValue::from(-1)).is_err());
        assert!(TaskType::try_from(RawValue::from(true)).is_err());
        assert!("folder".parse::<TaskType>().is_err());
    }

    #[test]
    fn priority_covers_zero_to_three() {
        for (code, expected) in [
            (0, Priority::None),
            (1, Priority::Low),
            (2, Priority::Medium),
            (3, Priority::High),
        ] {
            assert_eq!(Priority::try_from(RawValue::from(code)).unwrap(), expected);
            assert_eq!(expected.to_string(), code.to_string());
        }
        assert!("4".parse::<Priority>().is_err());
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn repeat_rejects_zero_and_none() {
        assert!(Repeat::try_from(RawValue::from(0)).is_err());
        assert!(Repeat::try_from(RawValue::from(7)).is_err());
        assert!("none".parse::<Repeat>().is_err());
        assert_eq!("1".parse::<Repeat>().unwrap(), Repeat::Daily);
        assert_eq!("weekdays".parse::<Repeat>().unwrap().code(), 2);
        assert_eq!(Repeat::Yearly.to_string(), "6");
    }

    #[test]
    fn every_coded_value_parses_back_from_its_code() {
        for value in Repeat::ALL {
            assert_eq!(value.to_string().parse::<Repeat>().unwrap(), *value);
        }
        for value in TaskType::ALL {
            assert_eq!(value.label().parse::<TaskType>().unwrap(), *value);
        }
    }

    #[test]
    fn flag_normalizes_accepted_forms() {
        let on = [RawValue::from(true), RawValue::from(1), RawValue::from("1")];
        let off = [RawValue::from(false), RawValue::from(0), RawValue::from("0")];

        for raw in &on {
            assert_eq!(Flag::from_raw("starred", raw).unwrap().as_str(), "1");
        }
        for raw in &off {
            assert_eq!(Flag::from_raw("starred", raw).unwrap().as_str(), "0");
        }
    }

    #[test]
    fn flag_rejects_other_values() {
        for raw in [
            RawValue::from(2),
            RawValue::from("yes"),
            RawValue::from("true"),
            RawValue::from(""),
        ] {
            let err = Flag::from_raw("ignore_defaults", &raw).unwrap_err();
            assert!(err.message().starts_with("invalid ignore_defaults"));
        }
    }
}
