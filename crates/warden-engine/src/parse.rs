//! Message parsing: raw text to command invocation.
//!
//! A message is a candidate command if it starts with the guild's
//! effective prefix or with an at-mention of the bot account. After the
//! leading token is stripped, the text splits on the first literal `--`
//! into the command line and an optional free-text trailing comment:
//!
//! ```text
//! !setcommandprefix ? -- switching prefixes
//! ^ prefix             ^ comment delimiter
//! ```
//!
//! Parsing is pure; side effects such as the direct-message notice are the
//! dispatcher's business.

use warden_core::{ChannelKind, UserId};

/// The delimiter separating the command line from its trailing comment.
const COMMENT_DELIMITER: &str = "--";

/// A parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The command name, lowercased.
    pub command: String,
    /// Positional string arguments.
    pub args: Vec<String>,
    /// The whitespace-trimmed trailing comment; empty when absent.
    pub comment: String,
}

/// Outcome of parsing one incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The message is a command invocation.
    Command(Invocation),
    /// The message arrived through a direct channel; command invocation
    /// over DM is not supported.
    DirectMessage,
    /// The message is not a command. Ignored silently, no side effect.
    Ignored,
}

/// Parses a raw message into a command invocation.
///
/// `prefix` is the effective prefix for the guild the message arrived in,
/// and `bot_user_id` the bot account's own id for mention recognition.
pub fn parse(
    content: &str,
    channel: ChannelKind,
    prefix: char,
    bot_user_id: &UserId,
) -> ParseOutcome {
    if channel == ChannelKind::Direct {
        return ParseOutcome::DirectMessage;
    }

    let rest = if let Some(rest) = strip_mention(content, bot_user_id) {
        rest
    } else if let Some(rest) = content.strip_prefix(prefix) {
        rest
    } else {
        return ParseOutcome::Ignored;
    };

    let (command_line, comment) = match rest.split_once(COMMENT_DELIMITER) {
        Some((line, comment)) => (line, comment.trim()),
        None => (rest, ""),
    };

    let mut tokens = command_line.split_whitespace();
    let Some(command) = tokens.next() else {
        // Bare prefix or bare mention carries no command.
        return ParseOutcome::Ignored;
    };

    ParseOutcome::Command(Invocation {
        command: command.to_lowercase(),
        args: tokens.map(str::to_string).collect(),
        comment: comment.to_string(),
    })
}

/// Strips a leading at-mention of the bot (`<@id>` or `<@!id>`).
fn strip_mention<'a>(content: &'a str, bot_user_id: &UserId) -> Option<&'a str> {
    let rest = content.strip_prefix("<@")?;
    let rest = rest.strip_prefix('!').unwrap_or(rest);
    let rest = rest.strip_prefix(bot_user_id.as_str())?;
    rest.strip_prefix('>')
}
