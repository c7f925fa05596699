use std::io::Write;
use twodo_core::error::AppError;

const DISABLE_ENV_VAR: &str = "TWODO_DISABLE_OPEN";

/// Hands a finished URL over to whatever application handles its scheme.
pub trait Opener {
    fn open(&self, url: &str) -> Result<(), AppError>;

    fn name(&self) -> &'static str;
}

pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), AppError> {
        open::that(url).map_err(|err| AppError::io(format!("failed to open {url}: {err}")))
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

pub struct NoopOpener;

impl Opener for NoopOpener {
    fn open(&self, _url: &str) -> Result<(), AppError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

pub fn opener_from_env() -> Box<dyn Opener> {
    if std::env::var_os(DISABLE_ENV_VAR).is_some() {
        return Box::new(NoopOpener);
    }

    Box::new(SystemOpener)
}

/// Writes `output` before opening, so the URL is still shown when the open fails.
pub fn emit(
    out: &mut impl Write,
    output: &str,
    url: &str,
    opener: Option<&dyn Opener>,
) -> Result<(), AppError> {
    writeln!(out, "{output}").map_err(|err| AppError::io(err.to_string()))?;
    out.flush().map_err(|err| AppError::io(err.to_string()))?;

    if let Some(opener) = opener {
        tracing::debug!(opener = opener.name(), "opening url");
        opener.open(url)?;
    }
    Ok(())
}
