mod fields;
mod raw;
mod schedule;
mod task;

pub use fields::{CodedField, Flag, Priority, Repeat, TaskType};
pub use raw::RawValue;
pub use schedule::{DayRef, DueTime};
pub use task::{Task, TaskFields};
