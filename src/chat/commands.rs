//! Slash command parsing for the terminal front-end.
//!
//! Lines that start with `/` control the front-end and are never submitted
//! as questions.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Display session statistics.
    Stats,

    /// Print the conversation so far.
    History,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted as a question.
///
/// # Examples
///
/// ```
/// # use folio_chat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("What do you build?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;
    let command = rest.split_whitespace().next().unwrap_or("").to_lowercase();

    let result = match command.as_str() {
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "stats" => ChatCommand::Stats,
        "history" => ChatCommand::History,
        "" => ChatCommand::Invalid("empty command".to_string()),
        other => ChatCommand::Invalid(format!("unknown command: /{other}")),
    };
    Some(result)
}

/// Returns the help text listing available commands.
pub fn help_text() -> &'static str {
    "\
/help, /?           Show this help
/stats              Show session statistics
/history            Print the conversation so far
/quit, /exit, /q    Exit"
}
