//! Plain-text renderings of session projections
//!
//! Everything here is a pure function from a snapshot piece to a string.

use lumen_core::language::FOLDER_ICON;
use lumen_core::{
    breadcrumb, classify, Channel, ConsoleKind, ConversationKind, FileRow, LogEntry, NodeKind,
    Notification, StatusLine, StyledSpan, Tab, Tokenizer, ViewerState,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a tab label may get before it is shortened
pub const TAB_LABEL_WIDTH: usize = 24;

/// Shorten `text` to at most `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_tree(rows: &[FileRow]) -> String {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let indent = "  ".repeat(row.depth);
        let line = match row.kind {
            NodeKind::Folder => {
                let arrow = if row.expanded { "▾" } else { "▸" };
                format!("{}{} {} {}  ({})", indent, arrow, FOLDER_ICON, row.name, row.id)
            }
            NodeKind::File => {
                format!("{}  {} {}  {}", indent, classify(&row.name).icon, row.name, row.path)
            }
        };
        out.push(line);
    }
    out.join("\n")
}

pub fn render_tabs(tabs: &[Tab]) -> String {
    if tabs.is_empty() {
        return "No open tabs".to_string();
    }
    tabs.iter()
        .map(|tab| {
            let marker = if tab.is_active { ">" } else { " " };
            let dirty = if tab.is_dirty { " ●" } else { "" };
            format!(
                "{} [{}] {}{}",
                marker,
                tab.id,
                fit(&tab.name, TAB_LABEL_WIDTH),
                dirty
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the viewer, highlighting through `tokenizer`
///
/// With `color` off, spans are printed without escape codes.
pub fn render_viewer(viewer: &ViewerState, tokenizer: &dyn Tokenizer, color: bool) -> String {
    let ViewerState::Document {
        path,
        language,
        syntax,
        content,
        is_dirty,
        ..
    } = viewer
    else {
        return "No file open".to_string();
    };

    let mut out = vec![format!(
        "{}{}  [{}]",
        breadcrumb(path).join(" › "),
        if *is_dirty { " ●" } else { "" },
        language
    )];

    let Some(text) = content else {
        out.push("(no content)".to_string());
        return out.join("\n");
    };

    let lines = tokenizer.tokenize(text, syntax.as_deref().unwrap_or(""));
    let gutter = lines.len().to_string().len();
    for (i, spans) in lines.iter().enumerate() {
        out.push(format!("{:>gutter$} │ {}", i + 1, paint(spans, color)));
    }
    out.join("\n")
}

fn paint(spans: &[StyledSpan], color: bool) -> String {
    if !color {
        return spans.iter().map(|s| s.text.as_str()).collect();
    }
    let mut out = String::new();
    for span in spans {
        let (r, g, b) = span.fg;
        out.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
        if span.bold {
            out.push_str("\x1b[1m");
        }
        if span.italic {
            out.push_str("\x1b[3m");
        }
        if span.underline {
            out.push_str("\x1b[4m");
        }
        out.push_str(&span.text);
        out.push_str("\x1b[0m");
    }
    out
}

fn stamp(ms: u64) -> String {
    format!("[{:>7.1}s]", ms as f64 / 1000.0)
}

pub fn render_chat_entry(entry: &LogEntry<ConversationKind>) -> String {
    let who = match (entry.kind, &entry.agent) {
        (ConversationKind::User, _) => "you".to_string(),
        (ConversationKind::Assistant, Some(agent)) => format!("assistant/{}", agent),
        (ConversationKind::Assistant, None) => "assistant".to_string(),
    };
    format!("{} {}: {}", stamp(entry.timestamp_ms), who, entry.content)
}

pub fn render_console_entry(entry: &LogEntry<ConsoleKind>) -> String {
    format!("{} {}{}", stamp(entry.timestamp_ms), entry.kind.prefix(), entry.content)
}

pub fn render_chat(entries: &[LogEntry<ConversationKind>]) -> String {
    entries.iter().map(render_chat_entry).collect::<Vec<_>>().join("\n")
}

pub fn render_console(entries: &[LogEntry<ConsoleKind>]) -> String {
    entries.iter().map(render_console_entry).collect::<Vec<_>>().join("\n")
}

pub fn render_status(status: &StatusLine) -> String {
    status.to_string()
}

/// Text form of a notification; snapshots are silent in text mode
pub fn render_notification(notification: &Notification) -> Option<String> {
    match notification {
        Notification::SnapshotChanged { .. } => None,
        Notification::EntryAppended {
            channel, content, ..
        } => {
            let tag = match channel {
                Channel::Conversation => "assistant",
                Channel::Console => "console",
            };
            Some(format!("<{}> {}", tag, content))
        }
        Notification::InputRejected { reason, .. } => Some(format!("! {}", reason)),
        Notification::ShuttingDown { cancelled } => Some(format!(
            "Shutting down ({} pending follow-up{} cancelled)",
            cancelled,
            if *cancelled == 1 { "" } else { "s" }
        )),
    }
}
