use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use command::*;
pub use console::*;
pub use message::*;

use crate::pager::Card;

mod command;
mod console;
mod message;

/// Identifies a message that was sent by the bot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Possible errors when displaying messages.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// The message was deleted, or never existed.
    #[error("message {0} is no longer reachable")]
    Unreachable(MessageId),

    #[error("failed to write message")]
    Io(#[from] std::io::Error),

    /// Likely a bug in a widget template.
    #[error("failed to render message")]
    Render(#[from] tera::Error),
}

/// Delivers messages to the chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a new message with a ranking and its controls.
    async fn send_card(&self, card: &Card) -> Result<MessageId, DisplayError>;

    /// Replace the ranking and controls of a previously sent message.
    async fn edit_card(&self, id: MessageId, card: &Card) -> Result<(), DisplayError>;

    /// Send the command reference.
    async fn send_help(&self) -> Result<MessageId, DisplayError>;

    /// Send a plain text message.
    async fn send_text(&self, text: &str) -> Result<MessageId, DisplayError>;
}
