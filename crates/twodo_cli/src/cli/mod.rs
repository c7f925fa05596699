use clap::{Args, Parser, Subcommand};
use twodo_core::config::{ConfigOverrides, canonical_alias_name};
use twodo_core::model::{RawValue, TaskFields};
use twodo_core::url::ShowCommand;

#[derive(Parser, Debug)]
#[command(name = "twodo", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Open the URL in 2Do instead of only printing it
    #[arg(short = 'e', long, global = true)]
    pub execute: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the URL for a new task
    ///
    /// Example: twodo add "Buy milk" -l Groceries -p 2 --due 1
    Add(AddArgs),
    /// Build a title-only URL for a new task
    ///
    /// Example: twodo quick "Call mom"
    Quick { title: Option<String> },
    /// Build the URL for one of the fixed list views
    ///
    /// Example: twodo show today
    Show {
        #[command(subcommand)]
        view: ShowView,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    pub title: Option<String>,

    /// Task type: 0 (task), 1 (project) or 2 (checklist)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub task_type: Option<String>,

    /// Name of the list the task goes into (or a configured alias)
    #[arg(short = 'l', long = "list", value_name = "LIST")]
    pub for_list: Option<String>,

    /// Name of the project or checklist the task goes into
    #[arg(long = "parent", value_name = "TASK")]
    pub parent_task: Option<String>,

    #[arg(short = 'n', long)]
    pub note: Option<String>,

    /// Priority: 0 (none) to 3 (high)
    #[arg(short = 'p', long)]
    pub priority: Option<String>,

    #[arg(short = 's', long)]
    pub starred: bool,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Due date: YYYY-MM-DD or number of days from today
    #[arg(short = 'd', long)]
    pub due: Option<String>,

    /// Due time: HH:MM
    #[arg(long = "due-time", value_name = "HH:MM")]
    pub due_time: Option<String>,

    /// Start: YYYY-MM-DD, "YYYY-MM-DD HH:MM" or number of days from today
    #[arg(long)]
    pub start: Option<String>,

    /// Repeat: 1 (daily), 2 (weekdays), 3 (weekly), 4 (biweekly), 5 (monthly), 6 (yearly)
    #[arg(short = 'r', long)]
    pub repeat: Option<String>,

    /// Action, e.g. "call:555-1234" or "url:https://example.com"
    #[arg(short = 'a', long)]
    pub action: Option<String>,

    /// Ignore the default settings configured in 2Do
    #[arg(long = "ignore-defaults")]
    pub ignore_defaults: bool,
}

impl AddArgs {
    pub fn into_fields(self) -> (Option<String>, TaskFields) {
        let fields = TaskFields {
            task_type: self.task_type.map(RawValue::from),
            for_list: self.for_list,
            parent_task: self.parent_task,
            note: self.note,
            priority: self.priority.map(RawValue::from),
            starred: self.starred.then_some(RawValue::Bool(true)),
            tags: self.tags,
            due: self.due.map(RawValue::from),
            due_time: self.due_time,
            start: self.start.map(RawValue::from),
            repeat: self.repeat.map(RawValue::from),
            action: self.action,
            ignore_defaults: self.ignore_defaults.then_some(RawValue::Bool(true)),
        };
        (self.title, fields)
    }
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ShowView {
    /// All tasks
    All,
    /// Tasks due today
    Today,
    /// Starred tasks
    Starred,
    /// Scheduled tasks
    Scheduled,
}

impl From<ShowView> for ShowCommand {
    fn from(view: ShowView) -> Self {
        match view {
            ShowView::All => Self::All,
            ShowView::Today => Self::Today,
            ShowView::Starred => Self::Starred,
            ShowView::Scheduled => Self::Scheduled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    DefaultList,
    DefaultTags,
    Execute,
    List(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field =
        canonical_alias_name(field).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "lists" | "list" => {
            let alias = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "lists override requires an alias name".to_string())?;
            return Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::List(alias.to_string()),
                value,
            });
        }
        "default_list" => ConfigOverrideTarget::DefaultList,
        "default_tags" => ConfigOverrideTarget::DefaultTags,
        "execute" => ConfigOverrideTarget::Execute,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if remainder.is_some() {
        return Err(format!("{canonical_field} override cannot have subfields"));
    }

    Ok(ParsedConfigOverride { target, value })
}

/// Collect every `--config-override` value into one set of overrides.
pub fn collect_config_overrides(raw_overrides: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();

    for raw in raw_overrides {
        let parsed = parse_config_override(raw)?;
        match parsed.target {
            ConfigOverrideTarget::DefaultList => overrides.default_list = Some(parsed.value),
            ConfigOverrideTarget::DefaultTags => overrides.default_tags = Some(parsed.value),
            ConfigOverrideTarget::Execute => {
                overrides.execute = Some(parse_switch(&parsed.value)?);
            }
            ConfigOverrideTarget::List(alias) => {
                overrides.lists.insert(alias, parsed.value);
            }
        }
    }

    Ok(overrides)
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("execute override expects true or false, got '{other}'")),
    }
}
