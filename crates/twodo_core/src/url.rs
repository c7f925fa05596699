//! `twodo://` command URLs.
//!
//! Only one-directional x-callback-url commands are produced; nothing here
//! expects or parses a callback.

use crate::model::{CodedField, Priority, Task, TaskType};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

pub const SCHEME: &str = "twodo";

pub const SHOW_ALL_URL: &str = "twodo://x-callback-url/showAll";
pub const SHOW_TODAY_URL: &str = "twodo://x-callback-url/showToday";
pub const SHOW_STARRED_URL: &str = "twodo://x-callback-url/showStarred";
pub const SHOW_SCHEDULED_URL: &str = "twodo://x-callback-url/showScheduled";

/// Everything except ASCII alphanumerics and the RFC 3986 unreserved marks.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Parameterless list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowCommand {
    All,
    Today,
    Starred,
    Scheduled,
}

impl ShowCommand {
    pub const ALL: [Self; 4] = [Self::All, Self::Today, Self::Starred, Self::Scheduled];

    pub fn url(self) -> &'static str {
        match self {
            Self::All => SHOW_ALL_URL,
            Self::Today => SHOW_TODAY_URL,
            Self::Starred => SHOW_STARRED_URL,
            Self::Scheduled => SHOW_SCHEDULED_URL,
        }
    }
}

pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Minimal `add` URL carrying only a title. No validation is applied.
pub fn add_url(title: &str) -> String {
    let mut url = CommandUrl::new("add");
    url.param("task", title);
    url.finish()
}

/// Serializes a task. Parameters follow a fixed order and default values are left out.
pub fn task_url(task: &Task) -> String {
    let mut url = CommandUrl::new("add");
    url.param("task", task.title());

    if task.task_type() != TaskType::Task {
        url.param("type", &task.task_type().code().to_string());
    }
    url.optional("for_list", task.for_list());
    url.optional("forParentTask", task.parent_task());
    url.optional("note", task.note());
    if task.priority() != Priority::None {
        url.param("priority", &task.priority().code().to_string());
    }
    if task.starred().is_on() {
        url.param("starred", task.starred().as_str());
    }
    url.optional("tags", task.tags());
    url.optional("due", task.due().map(|due| due.to_string()).as_deref());
    url.optional("dueTime", task.due_time().map(|time| time.to_string()).as_deref());
    url.optional("start", task.start().map(|start| start.to_string()).as_deref());
    if let Some(repeat) = task.repeat() {
        url.param("repeat", &repeat.code().to_string());
    }
    url.optional("action", task.action());
    if task.ignore_defaults().is_on() {
        url.param("ignoreDefaults", task.ignore_defaults().as_str());
    }

    url.finish()
}

struct CommandUrl {
    url: String,
    has_query: bool,
}

impl CommandUrl {
    fn new(command: &str) -> Self {
        Self {
            url: format!("{SCHEME}://x-callback-url/{command}"),
            has_query: false,
        }
    }

    fn param(&mut self, key: &str, value: &str) {
        self.url.push(if self.has_query { '&' } else { '?' });
        self.has_query = true;
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(&encode_value(value));
    }

    fn optional(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.param(key, value);
        }
    }

    fn finish(self) -> String {
        self.url
    }
}
