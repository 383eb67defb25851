use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use tally_core::error::{Result, TallyError};
use tally_core::formatting::format_duration;
use tally_core::messages::Messages;
use tally_core::settings::{InputSource, Settings};
use tally_pipeline::analysis::{calculate, Calculation};
use tally_runtime::clipboard::Clipboard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` value to a `tracing` filter directive.
pub fn normalise_level(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to `log_file` when given (without ANSI colours), otherwise to
/// stderr. Unrecognised levels fall back to `"warn"`.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };
    let stderr_layer = log_file.is_none().then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

// ── Input ──────────────────────────────────────────────────────────────────────

/// Read the whole one-shot input. Invalid UTF-8 is replaced rather than
/// rejected; the pipeline discards anything that is not a duration anyway.
pub fn read_input(source: &InputSource) -> Result<String> {
    let bytes = match source {
        InputSource::File(path) => fs::read(path).map_err(|source| TallyError::FileRead {
            path: path.clone(),
            source,
        })?,
        InputSource::Stdin => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ── Output ─────────────────────────────────────────────────────────────────────

/// Plain-text summary, one `label: value` pair per line.
pub fn render_text(calc: &Calculation, messages: &Messages) -> String {
    let labels = messages.summary_labels();
    let f = calc.summary.formatted();

    let mut rows: Vec<(String, String)> = vec![(labels.total.to_string(), f.total)];
    rows.extend(
        f.speeds
            .into_iter()
            .map(|(factor, value)| (messages.speed_label(&factor), value)),
    );
    rows.push((labels.count.to_string(), f.count.to_string()));
    rows.push((labels.average.to_string(), f.average));
    rows.push((labels.max.to_string(), f.max));

    rows.into_iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
}

/// JSON document with raw seconds, display strings, advisories and the
/// rejected line numbers.
pub fn render_json(calc: &Calculation) -> Result<String> {
    let mut value = serde_json::to_value(calc)?;
    value["formatted"] = serde_json::to_value(calc.summary.formatted())?;
    Ok(serde_json::to_string_pretty(&value)?)
}

// ── One-shot run ───────────────────────────────────────────────────────────────

/// How a one-shot run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A summary was printed.
    Ready,
    /// The input was empty or held no valid duration.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ready => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Calculate over `raw` and report it.
///
/// The summary goes to `out` as text or JSON. Fatal calculation errors,
/// text-mode advisories and copy notices go to `err`. With `--copy`, the
/// clipboard escape-sequence fallback is also written to `err` so `out` stays
/// machine-readable. A failed copy does not change the outcome.
pub async fn run_once<O: Write, E: Write>(
    raw: &str,
    settings: &Settings,
    clipboard: &Clipboard,
    out: &mut O,
    err: &mut E,
) -> Result<Outcome> {
    let messages = settings.messages();

    let calc = match calculate(raw) {
        Ok(calc) => calc,
        Err(e) if e.is_calculation_failure() => {
            writeln!(err, "{}", messages.error(&e))?;
            return Ok(Outcome::Failed);
        }
        Err(e) => return Err(e),
    };

    if settings.wants_json() {
        writeln!(out, "{}", render_json(&calc)?)?;
    } else {
        for advisory in &calc.advisories {
            writeln!(err, "{}", messages.advisory(advisory))?;
        }
        write!(out, "{}", render_text(&calc, &messages))?;
    }
    out.flush()?;

    if settings.copy {
        let line = messages.clipboard_text(
            &format_duration(calc.summary.total_seconds, true),
            calc.summary.count,
        );
        match clipboard.copy_with_fallback(&line, err).await {
            Ok(method) => {
                tracing::info!(?method, "summary copied");
                writeln!(err, "{}", messages.copy_success())?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                writeln!(err, "{}", messages.copy_failure())?;
            }
        }
    }

    Ok(Outcome::Ready)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tally_core::messages::Locale;
    use tally_runtime::clipboard::osc52_sequence;
    use tempfile::{NamedTempFile, TempDir};

    const MIXED: &str = "01:30:00\n45:00\ngarbage\n25:00:00";

    fn settings(args: &[&str]) -> Settings {
        Settings::load_from_args(std::iter::once("vidtally").chain(args.iter().copied()))
    }

    async fn one_shot(raw: &str, args: &[&str]) -> (Outcome, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run_once(raw, &settings(args), &Clipboard::new(vec![]), &mut out, &mut err)
            .await
            .expect("run_once");
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    // ── normalise_level ───────────────────────────────────────────────────────

    #[test]
    fn test_normalise_level_maps_names() {
        assert_eq!(normalise_level("DEBUG"), "debug");
        assert_eq!(normalise_level("info"), "info");
        assert_eq!(normalise_level("WARNING"), "warn");
        assert_eq!(normalise_level("ERROR"), "error");
        assert_eq!(normalise_level("tally_pipeline=trace"), "tally_pipeline=trace");
    }

    // ── open_log_file ─────────────────────────────────────────────────────────

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("nested").join("logs").join("vidtally.log");

        let mut file = open_log_file(&path).expect("open log file");
        writeln!(file, "hello").expect("write");

        assert!(path.is_file());
        let mut again = open_log_file(&path).expect("reopen");
        writeln!(again, "world").expect("append");
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\nworld\n");
    }

    // ── read_input ────────────────────────────────────────────────────────────

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().expect("tempfile");
        write!(file, "01:30:00\n45:00\n").expect("write");

        let text = read_input(&InputSource::File(file.path().to_path_buf())).expect("read");
        assert_eq!(text, "01:30:00\n45:00\n");
    }

    #[test]
    fn test_read_input_replaces_invalid_utf8() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(b"10:00\n\xff\xfe\n").expect("write");

        let text = read_input(&InputSource::File(file.path().to_path_buf())).expect("read");
        assert!(text.starts_with("10:00\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_input_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("absent.txt");

        let err = read_input(&InputSource::File(path.clone())).unwrap_err();
        match err {
            TallyError::FileRead { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ── render_text / render_json ─────────────────────────────────────────────

    #[test]
    fn test_render_text_english() {
        let calc = calculate("01:30:00\n45:00\ngarbage\n25:00:00").expect("calc");
        let text = render_text(&calc, &Messages::new(Locale::English));
        assert_eq!(
            text,
            "Total duration: 02:15:00\n\
             At 1.5x: 01:30:00\n\
             At 2.0x: 01:07:30\n\
             Videos: 2\n\
             Average: 01:07:30\n\
             Longest: 01:30:00\n"
        );
    }

    #[test]
    fn test_render_text_chinese_short_durations() {
        let calc = calculate("1:00\n2:00\n3:00").expect("calc");
        let text = render_text(&calc, &Messages::new(Locale::Chinese));
        assert!(text.contains("总时长: 00:06:00\n"));
        assert!(text.contains("平均时长: 02:00\n"));
        assert!(text.contains("最长视频: 03:00\n"));
    }

    #[test]
    fn test_render_json_fields() {
        let calc = calculate("01:00:00\nbad").expect("calc");
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&calc).expect("json")).expect("parse");

        assert_eq!(json["summary"]["total_seconds"], 3600);
        assert_eq!(json["formatted"]["total"], "01:00:00");
        assert_eq!(json["advisories"][0]["kind"], "invalid_lines");
        assert_eq!(json["advisories"][0]["count"], 1);
        assert_eq!(json["invalid_lines"][0]["line_number"], 2);
    }

    // ── run_once ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_run_once_empty_input_fails() {
        let (outcome, out, err) = one_shot("  \n\t\n", &["--format", "text"]).await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.is_empty());
        assert_eq!(err, "Please enter video durations\n");
    }

    #[tokio::test]
    async fn test_run_once_no_valid_data_fails() {
        let (outcome, out, err) = one_shot("abc\n00:00\n", &["--lang", "zh"]).await;
        assert_eq!(outcome, Outcome::Failed);
        assert!(out.is_empty());
        assert_eq!(err, "未找到有效的时长数据\n");
    }

    #[tokio::test]
    async fn test_run_once_text_mode_advisories_on_stderr() {
        let (outcome, out, err) = one_shot(MIXED, &["--format", "text"]).await;
        assert_eq!(outcome, Outcome::Ready);
        assert!(out.starts_with("Total duration: 02:15:00\n"));
        assert!(!out.contains("Ignored"));
        assert_eq!(err, "Ignored 2 invalid line(s)\n");
    }

    #[tokio::test]
    async fn test_run_once_json_mode_advisories_in_document() {
        let (outcome, out, err) = one_shot(MIXED, &["--format", "json"]).await;
        assert_eq!(outcome, Outcome::Ready);
        assert!(err.is_empty(), "unexpected stderr: {err}");

        let json: serde_json::Value = serde_json::from_str(&out).expect("stdout is json");
        assert_eq!(json["summary"]["total_seconds"], 8100);
        assert_eq!(json["advisories"][0]["kind"], "invalid_lines");
        assert_eq!(json["advisories"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_run_once_copy_fallback_goes_to_stderr() {
        let (outcome, out, err) = one_shot(MIXED, &["--format", "json", "--copy"]).await;
        assert_eq!(outcome, Outcome::Ready);

        assert!(!out.contains("\x1b]52"), "escape leaked into stdout");
        serde_json::from_str::<serde_json::Value>(&out).expect("stdout is still json");
        assert!(err.contains(&osc52_sequence("Total: 02:15:00 (2 videos)")));
        assert!(err.ends_with("Result copied to clipboard\n"));
    }
}
