//! Clipboard access with a terminal-escape fallback.
//!
//! The primary path pipes the text into the platform clipboard tool. When no
//! tool is available or every tool fails, the text is sent to the terminal as
//! an OSC 52 escape sequence, which most modern terminal emulators forward to
//! the system clipboard.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use tally_core::error::{Result, TallyError};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Upper bound on how long a clipboard tool may take.
const TOOL_TIMEOUT: Duration = Duration::from_secs(2);

/// An external program that reads clipboard contents from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// How a copy ended up succeeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// A clipboard tool accepted the text.
    SystemTool(&'static str),
    /// The OSC 52 sequence was written to the terminal.
    TerminalEscape,
}

/// Candidate tools for the current platform, in preference order.
pub fn platform_tools() -> Vec<ClipboardTool> {
    if cfg!(target_os = "macos") {
        vec![ClipboardTool {
            program: "pbcopy",
            args: &[],
        }]
    } else if cfg!(target_os = "windows") {
        vec![ClipboardTool {
            program: "clip",
            args: &[],
        }]
    } else {
        vec![
            ClipboardTool {
                program: "wl-copy",
                args: &[],
            },
            ClipboardTool {
                program: "xclip",
                args: &["-selection", "clipboard"],
            },
            ClipboardTool {
                program: "xsel",
                args: &["--clipboard", "--input"],
            },
        ]
    }
}

/// Encode `text` as an OSC 52 "set clipboard" sequence.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

pub struct Clipboard {
    tools: Vec<ClipboardTool>,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new(platform_tools())
    }
}

impl Clipboard {
    pub fn new(tools: Vec<ClipboardTool>) -> Self {
        Self { tools }
    }

    /// Copy `text`, falling back to an OSC 52 sequence on stdout.
    pub async fn copy(&self, text: &str) -> Result<CopyMethod> {
        let mut stdout = std::io::stdout();
        self.copy_with_fallback(text, &mut stdout).await
    }

    /// Copy `text`, writing the fallback sequence to `fallback` when no tool
    /// succeeds.
    pub async fn copy_with_fallback<W: Write>(
        &self,
        text: &str,
        fallback: &mut W,
    ) -> Result<CopyMethod> {
        for tool in &self.tools {
            match run_tool(tool, text).await {
                Ok(()) => {
                    debug!(program = tool.program, "copied via clipboard tool");
                    return Ok(CopyMethod::SystemTool(tool.program));
                }
                Err(e) => debug!(program = tool.program, error = %e, "clipboard tool failed"),
            }
        }

        warn!("no clipboard tool succeeded; falling back to terminal escape");
        write_osc52(fallback, text)
            .map(|()| CopyMethod::TerminalEscape)
            .map_err(|e| TallyError::Clipboard(e.to_string()))
    }
}

async fn run_tool(tool: &ClipboardTool, text: &str) -> std::io::Result<()> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        // Dropping stdin closes the pipe so the tool sees EOF.
    }

    let status = tokio::time::timeout(TOOL_TIMEOUT, child.wait())
        .await
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "clipboard tool timed out"))??;

    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{} exited with {}", tool.program, status)))
    }
}

fn write_osc52<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_TOOL: ClipboardTool = ClipboardTool {
        program: "vidtally-no-such-clipboard-tool",
        args: &[],
    };

    #[test]
    fn test_osc52_sequence_encodes_base64() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_platform_tools_not_empty() {
        assert!(!platform_tools().is_empty());
    }

    #[tokio::test]
    async fn test_missing_tool_falls_back_to_escape() {
        let clipboard = Clipboard::new(vec![MISSING_TOOL]);
        let mut sink: Vec<u8> = Vec::new();

        let method = clipboard
            .copy_with_fallback("Total: 00:01:00 (1 videos)", &mut sink)
            .await
            .expect("fallback succeeds");

        assert_eq!(method, CopyMethod::TerminalEscape);
        let written = String::from_utf8(sink).unwrap();
        assert_eq!(written, osc52_sequence("Total: 00:01:00 (1 videos)"));
    }

    #[tokio::test]
    async fn test_no_tools_uses_escape() {
        let clipboard = Clipboard::new(vec![]);
        let mut sink: Vec<u8> = Vec::new();
        let method = clipboard.copy_with_fallback("x", &mut sink).await.unwrap();
        assert_eq!(method, CopyMethod::TerminalEscape);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_working_tool_is_used() {
        // `cat` reads stdin to EOF and exits 0, like a clipboard tool.
        let clipboard = Clipboard::new(vec![
            MISSING_TOOL,
            ClipboardTool {
                program: "cat",
                args: &[],
            },
        ]);
        let mut sink: Vec<u8> = Vec::new();
        let method = clipboard.copy_with_fallback("x", &mut sink).await.unwrap();
        assert_eq!(method, CopyMethod::SystemTool("cat"));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_failing_fallback_is_clipboard_error() {
        struct BrokenWriter;
        impl Write for BrokenWriter {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let clipboard = Clipboard::new(vec![MISSING_TOOL]);
        let err = clipboard
            .copy_with_fallback("x", &mut BrokenWriter)
            .await
            .unwrap_err();
        assert!(matches!(err, TallyError::Clipboard(_)));
    }
}
