use clap::Parser;
use std::path::PathBuf;

use crate::messages::{Locale, Messages};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sum video durations and report totals, averages and playback-speed times
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vidtally",
    about = "Sum video durations and report totals, averages and playback-speed times",
    version
)]
pub struct Settings {
    /// File with one duration per line (`-` or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Launch the interactive terminal UI
    #[arg(short, long)]
    pub interactive: bool,

    /// Output format for one-shot runs
    #[arg(long, env = "VIDTALLY_FORMAT", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Message language
    #[arg(long, env = "VIDTALLY_LANG", default_value = "en", value_parser = ["en", "zh"])]
    pub lang: String,

    /// Display theme for the interactive UI
    #[arg(long, env = "VIDTALLY_THEME", default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Copy the summary line to the clipboard after a one-shot run
    #[arg(long)]
    pub copy: bool,

    /// Logging level
    #[arg(long, env = "VIDTALLY_LOG", default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Where one-shot input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    pub fn locale(&self) -> Locale {
        Locale::from_name(&self.lang)
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.locale())
    }

    pub fn wants_json(&self) -> bool {
        self.format == "json"
    }

    pub fn input_source(&self) -> InputSource {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path.clone()),
            _ => InputSource::Stdin,
        }
    }

    /// Log destination. Interactive sessions never log to the terminal they
    /// draw on, so they fall back to [`default_log_path`] when no explicit
    /// `--log-file` was given.
    pub fn resolved_log_file(&self) -> Option<PathBuf> {
        match (&self.log_file, self.interactive) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(default_log_path()),
            (None, false) => None,
        }
    }
}

/// `<cache dir>/vidtally/vidtally.log`, or `./vidtally.log` when the platform
/// has no cache directory.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("vidtally"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidtally.log")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
