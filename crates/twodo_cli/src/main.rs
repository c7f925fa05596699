use clap::Parser;
use tracing_subscriber::EnvFilter;
use twodo_cli::cli::{Cli, Command, collect_config_overrides};
use twodo_cli::launch::{emit, opener_from_env};
use twodo_core::config::{self, Config, merge_overrides};
use twodo_core::error::AppError;
use twodo_core::model::Task;
use twodo_core::url::{ShowCommand, add_url};

const LOG_ENV_VAR: &str = "TWODO_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn render_url_json(url: &str, task: Option<&Task>, execute: bool) -> Result<String, AppError> {
    let mut payload = serde_json::json!({
        "url": url,
        "execute": execute,
    });
    if let Some(task) = task {
        payload["task"] =
            serde_json::to_value(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    }
    Ok(payload.to_string())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn required_title(title: Option<String>) -> Result<String, AppError> {
    match title {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::invalid_input("title is required")),
    }
}

fn load_config(raw_overrides: &[String]) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        tracing::warn!(error = %err, "using default configuration");
    }

    let overrides = collect_config_overrides(raw_overrides).map_err(AppError::invalid_input)?;
    Ok(merge_overrides(&loaded.config, &overrides))
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = load_config(&cli.config_override)?;
    let execute = cli.execute || config.execute;

    let (url, task) = match cli.command {
        Command::Add(args) => {
            let (title, mut fields) = args.into_fields();
            let title = required_title(title)?;
            config.apply_defaults(&mut fields);
            let task = Task::with_fields(&title, fields)?;
            (task.url(), Some(task))
        }
        Command::Quick { title } => (add_url(&required_title(title)?), None),
        Command::Show { view } => (ShowCommand::from(view).url().to_string(), None),
    };
    tracing::debug!(%url, "built command url");

    let output = if cli.json {
        render_url_json(&url, task.as_ref(), execute)?
    } else {
        url.clone()
    };

    let opener = execute.then(opener_from_env);
    emit(&mut std::io::stdout(), &output, &url, opener.as_deref())
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
