use crate::error::AppError;
use crate::model::{CodedField, DayRef, DueTime, Flag, Priority, RawValue, Repeat, TaskType};
use serde::Serialize;

/// Optional inputs for a new task. Every field defaults to absent.
///
/// ```
/// use twodo_core::model::{Task, TaskFields};
///
/// let task = Task::with_fields(
///     "Pay rent",
///     TaskFields {
///         due: Some("2015-10-02".into()),
///         priority: Some(3.into()),
///         ..TaskFields::default()
///     },
/// )
/// .unwrap();
/// assert_eq!(
///     task.url(),
///     "twodo://x-callback-url/add?task=Pay%20rent&priority=3&due=2015-10-02"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub task_type: Option<RawValue>,
    pub for_list: Option<String>,
    pub parent_task: Option<String>,
    pub note: Option<String>,
    pub priority: Option<RawValue>,
    pub starred: Option<RawValue>,
    pub tags: Option<String>,
    pub due: Option<RawValue>,
    pub due_time: Option<String>,
    pub start: Option<RawValue>,
    pub repeat: Option<RawValue>,
    pub action: Option<String>,
    pub ignore_defaults: Option<RawValue>,
}

/// A validated task, ready to be turned into an `add` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    title: String,
    #[serde(rename = "type")]
    task_type: TaskType,
    for_list: Option<String>,
    parent_task: Option<String>,
    note: Option<String>,
    priority: Priority,
    starred: Flag,
    tags: Option<String>,
    due: Option<DayRef>,
    due_time: Option<DueTime>,
    start: Option<DayRef>,
    repeat: Option<Repeat>,
    action: Option<String>,
    ignore_defaults: Flag,
}

impl Task {
    pub fn new(title: &str) -> Result<Self, AppError> {
        Self::with_fields(title, TaskFields::default())
    }

    /// Validates every field; the first invalid one is reported.
    pub fn with_fields(title: &str, fields: TaskFields) -> Result<Self, AppError> {
        if title.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        Ok(Self {
            title: title.to_string(),
            task_type: optional_coded(fields.task_type.as_ref())?.unwrap_or_default(),
            for_list: fields.for_list,
            parent_task: fields.parent_task,
            note: fields.note,
            priority: optional_coded(fields.priority.as_ref())?.unwrap_or_default(),
            starred: optional_flag("starred", fields.starred.as_ref())?,
            tags: fields.tags,
            due: fields.due.as_ref().map(DayRef::parse_due).transpose()?,
            due_time: fields.due_time.as_deref().map(DueTime::parse).transpose()?,
            start: fields.start.as_ref().map(DayRef::parse_start).transpose()?,
            repeat: optional_coded(fields.repeat.as_ref())?,
            action: fields.action,
            ignore_defaults: optional_flag("ignore_defaults", fields.ignore_defaults.as_ref())?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn for_list(&self) -> Option<&str> {
        self.for_list.as_deref()
    }

    pub fn parent_task(&self) -> Option<&str> {
        self.parent_task.as_deref()
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn starred(&self) -> Flag {
        self.starred
    }

    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    pub fn due(&self) -> Option<DayRef> {
        self.due
    }

    pub fn due_time(&self) -> Option<DueTime> {
        self.due_time
    }

    pub fn start(&self) -> Option<DayRef> {
        self.start
    }

    pub fn repeat(&self) -> Option<Repeat> {
        self.repeat
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn ignore_defaults(&self) -> Flag {
        self.ignore_defaults
    }

    /// The `twodo://x-callback-url/add` URL for this task.
    pub fn url(&self) -> String {
        crate::url::task_url(self)
    }
}

fn optional_coded<T: CodedField>(raw: Option<&RawValue>) -> Result<Option<T>, AppError> {
    raw.map(T::from_raw).transpose()
}

fn optional_flag(field: &str, raw: Option<&RawValue>) -> Result<Flag, AppError> {
    raw.map(|value| Flag::from_raw(field, value))
        .transpose()
        .map(Option::unwrap_or_default)
}
