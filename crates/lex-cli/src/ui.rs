use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrower terminals get the natural table width instead of clipping.
const MIN_TABLE_WIDTH: usize = 40;

/// Rendering preferences fixed once per process.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let prefs = UiPrefs {
        table_color: flags.format == OutputFormat::Table
            && !flags.quiet
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal(),
        term_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .filter(|width| *width >= MIN_TABLE_WIDTH),
    };
    if UI_PREFS.set(prefs).is_err() {
        tracing::debug!("ui preferences already initialised");
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
