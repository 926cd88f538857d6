//! Line grammar for the interactive frontend
//!
//! Each input line becomes at most one [`Action`]. Words are split on the
//! first run of whitespace; everything after the verb is the argument.

use lumen_core::{Command, PanelId, TabId};
use thiserror::Error;

/// Something the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Forward to the session
    Send(Command),

    /// Flip the dirty flag of a tab
    ToggleDirty(TabId),

    /// Print a projection
    Show(View),

    Help,
    Quit,
}

/// Printable projections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Tree,
    Tabs,
    Viewer,
    Chat,
    Console,
    Status,
    Snapshot,
}

/// Why a line was not understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("{0}")]
    InvalidArgument(String),
}

pub const HELP: &str = "\
open <path>      open a file from the tree
tab <id>         switch to a tab
close <id>       close a tab
dirty <id>       flip a tab's unsaved marker
panel <name>     show a side panel (explorer, search, source-control, ...)
filter [text]    filter the tree; no text clears it
toggle <id>      open or close a folder
ask <text>       message the assistant
run <text>       run a console command
model <name>     pick the assistant model
agent <name>     pick the assistant agent
tree | tabs | view | chat | console | status | snapshot
help | quit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = match verb.to_lowercase().as_str() {
        "open" => Action::Send(Command::select_file(required(rest, "open", "a path")?)),
        "tab" => Action::Send(Command::click_tab(tab_id(rest, "tab")?)),
        "close" => Action::Send(Command::close_tab(tab_id(rest, "close")?)),
        "dirty" => Action::ToggleDirty(tab_id(rest, "dirty")?),
        "panel" => {
            let name = required(rest, "panel", "a panel name")?;
            let panel = name.parse::<PanelId>().map_err(ParseError::InvalidArgument)?;
            Action::Send(Command::select_panel(panel))
        }
        "filter" => Action::Send(Command::set_tree_filter(rest)),
        "toggle" => Action::Send(Command::toggle_folder(required(rest, "toggle", "a node id")?)),
        // Blank text is passed through so the session can reject it
        "ask" => Action::Send(Command::submit_message(rest)),
        "run" => Action::Send(Command::submit_command(rest)),
        "model" => Action::Send(Command::select_model(required(rest, "model", "a model name")?)),
        "agent" => Action::Send(Command::select_agent(required(rest, "agent", "an agent name")?)),
        "tree" => Action::Show(View::Tree),
        "tabs" => Action::Show(View::Tabs),
        "view" => Action::Show(View::Viewer),
        "chat" => Action::Show(View::Chat),
        "console" => Action::Show(View::Console),
        "status" => Action::Show(View::Status),
        "snapshot" => Action::Show(View::Snapshot),
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(action))
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

fn tab_id(rest: &str, command: &'static str) -> Result<TabId, ParseError> {
    let raw = required(rest, command, "a tab id")?;
    raw.parse::<u64>()
        .map(TabId::new)
        .map_err(|_| ParseError::InvalidArgument(format!("'{}' is not a tab id", raw)))
}
