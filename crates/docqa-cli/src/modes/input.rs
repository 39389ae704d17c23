//! REPL line parsing.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `/select <paths…>`; an empty list clears the selection.
    Select(Vec<PathBuf>),
    Files,
    Upload,
    Reset,
    Confirm,
    Cancel,
    /// Re-send the current draft.
    Retry,
    Status,
    Help,
    Quit,
    /// Any line that is not a command, `/ask <text>`, or a line starting
    /// with `//` (sent without the first slash).
    Ask(String),
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  /select <files…>  choose PDF files for the next upload
  /files            list the selected files
  /upload           upload the selected files and start a new session
  /reset            clear the session (asks for confirmation)
  /yes, /no         confirm or cancel a pending reset
  /retry            ask the last unanswered question again
  /status           show session and request status
  /help             show this help
  /quit             exit
Anything else is sent as a question. To ask something that starts with
a slash, use /ask <question> or double the slash (//etc/hosts is what?).";

pub fn parse(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed == ":q" {
        return ReplCommand::Quit;
    }
    if let Some(question) = trimmed.strip_prefix("//") {
        return ReplCommand::Ask(format!("/{question}"));
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ReplCommand::Ask(line.to_string());
    };

    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, args)| (name, args.trim()));
    match name {
        "ask" => ReplCommand::Ask(args.to_string()),
        "select" => ReplCommand::Select(args.split_whitespace().map(PathBuf::from).collect()),
        "files" => ReplCommand::Files,
        "upload" => ReplCommand::Upload,
        "reset" => ReplCommand::Reset,
        "yes" | "y" => ReplCommand::Confirm,
        "no" | "n" => ReplCommand::Cancel,
        "retry" => ReplCommand::Retry,
        "status" => ReplCommand::Status,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_string()),
    }
}
