//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`.
//! Everything else the user types is a message for the agent.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Open a new session on the service.
    New,

    /// List known sessions.
    Sessions,

    /// Make a session active, by list position or id.
    Switch(String),

    /// Delete a session, by list position or id.
    Delete(String),

    /// Attach one or more files to the draft.
    Attach(Vec<String>),

    /// Remove the attachment at this zero-based index.
    Detach(usize),

    /// List pending attachments.
    Files,

    /// Send the draft as it stands, even if it only has attachments.
    Send,

    /// Print the active transcript.
    Show,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be sent as a message.
///
/// # Examples
///
/// ```
/// # use sindhu::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("/new"), Some(ChatCommand::New));
/// assert_eq!(parse_command("/switch 2"), Some(ChatCommand::Switch("2".to_string())));
/// assert!(parse_command("Which schemes can I apply for?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    let rest = input.strip_prefix('/')?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" => ChatCommand::New,
        "sessions" | "ls" => ChatCommand::Sessions,
        "switch" | "select" => match argument {
            Some(selector) => ChatCommand::Switch(selector.to_string()),
            None => ChatCommand::Invalid("/switch requires a session number or id".to_string()),
        },
        "delete" | "rm" => match argument {
            Some(selector) => ChatCommand::Delete(selector.to_string()),
            None => ChatCommand::Invalid("/delete requires a session number or id".to_string()),
        },
        "attach" => match argument {
            Some(paths) => {
                ChatCommand::Attach(paths.split_whitespace().map(str::to_string).collect())
            }
            None => ChatCommand::Invalid("/attach requires at least one file path".to_string()),
        },
        "detach" => parse_detach(argument),
        "files" => ChatCommand::Files,
        "send" => ChatCommand::Send,
        "show" => ChatCommand::Show,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_detach(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid("/detach requires a file number".to_string());
    };
    match arg.parse::<usize>() {
        Ok(position) if position > 0 => ChatCommand::Detach(position - 1),
        _ => ChatCommand::Invalid("/detach expects a file number from /files".to_string()),
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                   Start a new session
  /sessions              List sessions (alias /ls)
  /switch <n|id>         Make a session active
  /delete <n|id>         Delete a session on the server
  /attach <path>...      Attach files to the next message
  /detach <n>            Remove an attached file
  /files                 List attached files
  /send                  Send the attached files without text
  /show                  Show the active conversation
  /help                  Show this help message
  /quit                  Exit the chat
Anything else is sent to the agent in the active session."#
}
