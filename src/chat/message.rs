use std::fmt::{Display, Formatter};

use crate::chat::COMMAND_REFERENCE;
use crate::network::ApiError;

/// Plain text messages from the bot.
pub enum BotMessage<'a> {
    /// A ranking could not be fetched.
    FetchFailed {
        what: &'a str,
        error: &'a ApiError,
    },

    /// The message looked like a command, but isn't one.
    UnknownCommand,
}

impl Display for BotMessage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use BotMessage::*;

        match self {
            // Not found is no failure of the API, so its message stands on its own.
            FetchFailed { what, error } => match error {
                ApiError::NotFound(_) => write!(f, "{}", error),
                _ => write!(f, "Failed to fetch {}: {}", what, error),
            },

            UnknownCommand => write!(f, "Unknown command. Try one of these:\n{}", COMMAND_REFERENCE),
        }
    }
}
