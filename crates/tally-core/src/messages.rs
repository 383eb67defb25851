//! Localized user-facing message catalog.
//!
//! Every string shown to the user passes through [`Messages`]. Errors keep
//! their English `Display` text for logs; this catalog is what the CLI and the
//! terminal UI print. Output is always treated as plain text.

use crate::advisory::Advisory;
use crate::error::TallyError;
use crate::formatting::join_line_numbers;

// ── Locale ────────────────────────────────────────────────────────────────────

/// Supported message languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl Locale {
    /// Resolve a locale from its short name. Unknown names fall back to English.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" | "chinese" => Locale::Chinese,
            _ => Locale::English,
        }
    }

    /// Short canonical name, e.g. `"en"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Chinese => "zh",
        }
    }
}

// ── Result labels ─────────────────────────────────────────────────────────────

/// Field labels for a rendered summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryLabels {
    pub total: &'static str,
    pub speed: &'static str,
    pub count: &'static str,
    pub average: &'static str,
    pub max: &'static str,
}

/// Titles and hints for the interactive screen.
#[derive(Debug, Clone, Copy)]
pub struct UiLabels {
    pub app_title: &'static str,
    pub editor_title: &'static str,
    pub placeholder: &'static str,
    pub results_title: &'static str,
    pub help_title: &'static str,
    pub key_hints: &'static str,
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// Message catalog bound to one [`Locale`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Text for an error shown to the user.
    pub fn error(&self, err: &TallyError) -> String {
        match (self.locale, err) {
            (Locale::English, TallyError::EmptyInput) => {
                "Please enter video durations".to_string()
            }
            (Locale::Chinese, TallyError::EmptyInput) => "请输入视频时长数据".to_string(),
            (Locale::English, TallyError::NoValidData) => {
                "No valid duration data found".to_string()
            }
            (Locale::Chinese, TallyError::NoValidData) => "未找到有效的时长数据".to_string(),
            (_, TallyError::NothingToCopy) => self.nothing_to_copy(),
            (_, TallyError::Clipboard(_)) => self.copy_failure(),
            (_, other) => other.to_string(),
        }
    }

    /// Text for an advisory shown next to a computed summary.
    pub fn advisory(&self, advisory: &Advisory) -> String {
        match (self.locale, advisory) {
            (Locale::English, Advisory::InputTruncated { limit }) => {
                format!("Input too long, only the first {} characters were used", limit)
            }
            (Locale::Chinese, Advisory::InputTruncated { limit }) => {
                format!("输入内容过长，已截取前 {} 个字符", limit)
            }
            (Locale::English, Advisory::LineCapExceeded { limit }) => {
                format!("Too many lines, only the first {} were processed", limit)
            }
            (Locale::Chinese, Advisory::LineCapExceeded { limit }) => {
                format!("输入行数过多，仅处理前 {} 行", limit)
            }
            (Locale::English, Advisory::InvalidLines { count }) => {
                format!("Ignored {} invalid line(s)", count)
            }
            (Locale::Chinese, Advisory::InvalidLines { count }) => {
                format!("忽略了 {} 行无效数据", count)
            }
            (
                Locale::English,
                Advisory::InvalidLinesPreview {
                    line_numbers,
                    total,
                },
            ) => {
                let suffix = if *total > line_numbers.len() {
                    format!(" ({} lines in total)", total)
                } else {
                    String::new()
                };
                format!(
                    "Invalid format on line {}{}",
                    join_line_numbers(line_numbers),
                    suffix
                )
            }
            (
                Locale::Chinese,
                Advisory::InvalidLinesPreview {
                    line_numbers,
                    total,
                },
            ) => {
                let suffix = if *total > line_numbers.len() {
                    format!(" 等{}行", total)
                } else {
                    String::new()
                };
                format!("第 {} 行格式无效{}", join_line_numbers(line_numbers), suffix)
            }
        }
    }

    pub fn copy_success(&self) -> String {
        match self.locale {
            Locale::English => "Result copied to clipboard".to_string(),
            Locale::Chinese => "结果已复制到剪贴板".to_string(),
        }
    }

    pub fn copy_failure(&self) -> String {
        match self.locale {
            Locale::English => "Copy failed, please copy manually".to_string(),
            Locale::Chinese => "复制失败，请手动复制".to_string(),
        }
    }

    pub fn nothing_to_copy(&self) -> String {
        match self.locale {
            Locale::English => "No result to copy".to_string(),
            Locale::Chinese => "没有可复制的结果".to_string(),
        }
    }

    /// Shown after the editor is preloaded from a file.
    pub fn input_loaded(&self, lines: usize) -> String {
        match self.locale {
            Locale::English => format!("Loaded {} line(s), press F5 to calculate", lines),
            Locale::Chinese => format!("已载入 {} 行，按 F5 计算", lines),
        }
    }

    /// The single line placed on the clipboard. Always carries both the
    /// formatted total and the video count.
    pub fn clipboard_text(&self, total: &str, count: usize) -> String {
        match self.locale {
            Locale::English => format!("Total: {} ({} videos)", total, count),
            Locale::Chinese => format!("总时长: {} ({}个视频)", total, count),
        }
    }

    pub fn summary_labels(&self) -> SummaryLabels {
        match self.locale {
            Locale::English => SummaryLabels {
                total: "Total duration",
                speed: "At",
                count: "Videos",
                average: "Average",
                max: "Longest",
            },
            Locale::Chinese => SummaryLabels {
                total: "总时长",
                speed: "倍速",
                count: "视频数量",
                average: "平均时长",
                max: "最长视频",
            },
        }
    }

    pub fn ui_labels(&self) -> UiLabels {
        match self.locale {
            Locale::English => UiLabels {
                app_title: "VIDEO DURATION TALLY",
                editor_title: "Durations",
                placeholder: "One duration per line, e.g. 45:00 or 01:30:00",
                results_title: "Summary",
                help_title: "Help",
                key_hints: "F5 calculate | Ctrl+L clear | Ctrl+Y copy | F1 help | Ctrl+C quit",
            },
            Locale::Chinese => UiLabels {
                app_title: "视频时长统计",
                editor_title: "视频时长",
                placeholder: "每行一个时长，例如 45:00 或 01:30:00",
                results_title: "统计结果",
                help_title: "帮助",
                key_hints: "F5 计算 | Ctrl+L 清空 | Ctrl+Y 复制 | F1 帮助 | Ctrl+C 退出",
            },
        }
    }

    /// Label for a speed-adjusted total, e.g. `"At 1.5x"`.
    pub fn speed_label(&self, factor: &str) -> String {
        match self.locale {
            Locale::English => format!("{} {}", self.summary_labels().speed, factor),
            Locale::Chinese => format!("{}{}", factor, self.summary_labels().speed),
        }
    }

    /// Body of the help screen, one entry per line.
    pub fn help_lines(&self) -> &'static [&'static str] {
        match self.locale {
            Locale::English => &[
                "Enter one video duration per line.",
                "",
                "Accepted formats:",
                "  MM:SS      e.g. 45:00 or 5:07",
                "  HH:MM:SS   e.g. 01:30:00 or 1:02:03",
                "",
                "Hours go up to 23, minutes and seconds up to 59.",
                "Zero-length lines and anything else are skipped.",
                "",
                "Keys:",
                "  Ctrl+Enter / F5   calculate",
                "  Ctrl+L            clear input",
                "  Ctrl+Y            copy result",
                "  F1 / Ctrl+H       toggle this help",
                "  Esc               close help / quit",
                "  Ctrl+C            quit",
            ],
            Locale::Chinese => &[
                "每行输入一个视频时长。",
                "",
                "支持的格式：",
                "  MM:SS      例如 45:00 或 5:07",
                "  HH:MM:SS   例如 01:30:00 或 1:02:03",
                "",
                "小时最大 23，分钟和秒最大 59。",
                "时长为零的行及其他内容会被忽略。",
                "",
                "快捷键：",
                "  Ctrl+Enter / F5   计算",
                "  Ctrl+L            清空输入",
                "  Ctrl+Y            复制结果",
                "  F1 / Ctrl+H       显示/隐藏帮助",
                "  Esc               关闭帮助 / 退出",
                "  Ctrl+C            退出",
            ],
        }
    }
}
