use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tklog::{Format, LEVEL, LOG};

pub const LOG_FILE_ENV: &str = "PDFPANE_LOG_FILE";
const APP_DIR_NAME: &str = "pdfpane";

static LOG_PATHS: OnceLock<LogPaths> = OnceLock::new();
static FILE_LOGGING: AtomicBool = AtomicBool::new(false);
static FILE_SINK_ATTACHED: AtomicBool = AtomicBool::new(false);

/// Per-user state directory, `%APPDATA%\pdfpane` or `~/.pdfpane`.
pub fn app_state_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    if let Some(app_data) = std::env::var_os("APPDATA") {
        return Some(PathBuf::from(app_data).join(APP_DIR_NAME));
    }

    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(format!(".{APP_DIR_NAME}")))
}

/// Where the rotated log goes and where the on/off switch is remembered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogPaths {
    log_file: PathBuf,
    switch_file: PathBuf,
}

impl LogPaths {
    fn from_env() -> Self {
        let override_path = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from);
        let platform_log_dir = std::env::var_os("HOME")
            .filter(|_| cfg!(target_os = "macos"))
            .map(|home| PathBuf::from(home).join("Library").join("Logs").join(APP_DIR_NAME));
        Self::resolve(override_path, platform_log_dir, app_state_dir())
    }

    fn resolve(
        override_path: Option<PathBuf>,
        platform_log_dir: Option<PathBuf>,
        state_dir: Option<PathBuf>,
    ) -> Self {
        let state_dir = state_dir.unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME));
        let log_file = override_path
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| platform_log_dir.map(|dir| dir.join("debug.log")))
            .unwrap_or_else(|| state_dir.join("logs").join("debug.log"));

        Self {
            log_file,
            switch_file: state_dir.join("logging_enabled"),
        }
    }
}

fn log_paths() -> &'static LogPaths {
    LOG_PATHS.get_or_init(LogPaths::from_env)
}

fn switch_is_on(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn remember_switch(path: &Path, enabled: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, if enabled { "on" } else { "off" })
        .with_context(|| format!("write {}", path.display()))
}

pub fn log_file_path() -> &'static Path {
    &log_paths().log_file
}

pub fn file_logging_enabled() -> bool {
    FILE_LOGGING.load(Ordering::Relaxed)
}

/// Starts mirroring debug lines into the rotated log file and remembers the
/// choice for the next launch.
pub fn enable_file_logging() -> Result<()> {
    if file_logging_enabled() {
        return Ok(());
    }

    let paths = log_paths();
    if let Some(parent) = paths.log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log dir {}", parent.display()))?;
    }

    // The file sink can only be attached once per process; 10 MiB x 5 backups.
    if !FILE_SINK_ATTACHED.swap(true, Ordering::Relaxed) {
        let path = paths.log_file.to_string_lossy().into_owned();
        LOG.set_cutmode_by_size(&path, 10 * 1024 * 1024, 5, true);
    }

    FILE_LOGGING.store(true, Ordering::Relaxed);
    remember_switch(&paths.switch_file, true)
}

pub fn disable_file_logging() -> Result<()> {
    FILE_LOGGING.store(false, Ordering::Relaxed);
    remember_switch(&log_paths().switch_file, false)
}

pub fn initialize() {
    LOG.set_level(LEVEL::Debug)
        .set_console(true)
        .set_format(Format::LevelFlag | Format::Date | Format::Time | Format::ShortFileName)
        .set_formatter("{level}{time} {file}:{message}\n");

    let switched_on = std::fs::read_to_string(&log_paths().switch_file)
        .map(|raw| switch_is_on(&raw))
        .unwrap_or(false);
    if switched_on && let Err(err) = enable_file_logging() {
        eprintln!("[log] file logging unavailable: {err:#}");
    }
}

/// Debug line, emitted only while file logging is switched on.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        if $crate::logger::file_logging_enabled() {
            tklog::debug!(format!($($arg)*));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::{LogPaths, switch_is_on};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn switch_accepts_common_truthy_values() {
        for raw in ["1", "true", " YES\n", "on"] {
            assert!(switch_is_on(raw), "{raw:?}");
        }
        for raw in ["0", "off", "", "enabled"] {
            assert!(!switch_is_on(raw), "{raw:?}");
        }
    }

    #[test]
    fn env_override_wins_over_platform_dir() {
        let paths = LogPaths::resolve(
            Some(PathBuf::from("/tmp/custom.log")),
            Some(PathBuf::from("/home/u/Library/Logs/pdfpane")),
            Some(PathBuf::from("/home/u/.pdfpane")),
        );
        assert_eq!(paths.log_file, PathBuf::from("/tmp/custom.log"));
        assert_eq!(
            paths.switch_file,
            PathBuf::from("/home/u/.pdfpane/logging_enabled")
        );
    }

    #[test]
    fn empty_override_falls_back_to_state_dir() {
        let paths = LogPaths::resolve(
            Some(PathBuf::new()),
            None,
            Some(PathBuf::from("/home/u/.pdfpane")),
        );
        assert_eq!(
            paths.log_file,
            PathBuf::from("/home/u/.pdfpane/logs/debug.log")
        );
    }

    #[test]
    fn platform_log_dir_is_used_without_override() {
        let paths = LogPaths::resolve(
            None,
            Some(PathBuf::from("/home/u/Library/Logs/pdfpane")),
            Some(PathBuf::from("/home/u/.pdfpane")),
        );
        assert_eq!(
            paths.log_file,
            PathBuf::from("/home/u/Library/Logs/pdfpane/debug.log")
        );
    }
}
