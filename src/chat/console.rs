use std::collections::HashSet;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::chat::{BotCommand, DisplayError, MessageId, Messenger, COMMAND_REFERENCE};
use crate::pager::{Card, NavAction};
use crate::widget::{HelpWidget, RankingWidget, Widget};

/// Input lines of the console chat.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleInput<'a> {
    /// A `/command`, or `None` if it is unknown.
    Command(Option<BotCommand<'a>>),

    /// A button press below a ranking, f.e. `#3 next`.
    Press { message: MessageId, action: NavAction },

    /// Anything else is ignored.
    Chatter,
}

impl<'a> ConsoleInput<'a> {
    pub fn parse(line: &'a str) -> ConsoleInput<'a> {
        let line = line.trim();
        if line.starts_with('/') {
            return ConsoleInput::Command(BotCommand::from(line));
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let (id, button) = match &parts[..] {
            [id, button] => (id, button),
            _ => return ConsoleInput::Chatter,
        };

        let message = match id.trim_start_matches('#').parse::<u64>() {
            Ok(id) => MessageId(id),
            Err(_) => return ConsoleInput::Chatter,
        };

        let action = match button.to_lowercase().as_str() {
            "back" | "previous" | "prev" => NavAction::Previous,
            "next" => NavAction::Next,
            "reset" => NavAction::Reset,
            _ => return ConsoleInput::Chatter,
        };

        ConsoleInput::Press { message, action }
    }
}

/// Displays messages by writing them to an output stream,
/// typically stdout.
pub struct ConsoleMessenger<W> {
    state: Mutex<ConsoleState<W>>,
}

struct ConsoleState<W> {
    out: W,
    next_id: u64,

    /// IDs of all messages that are still visible.
    sent: HashSet<MessageId>,
}

impl<W> ConsoleMessenger<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(out: W) -> Self {
        ConsoleMessenger {
            state: Mutex::new(ConsoleState {
                out,
                next_id: 1,
                sent: HashSet::new(),
            }),
        }
    }

    /// Forget a message, so that it can no longer be edited.
    #[cfg(test)]
    pub async fn delete(&self, id: MessageId) -> bool {
        self.state.lock().await.sent.remove(&id)
    }

    /// Write a new message, with the ID it will be assigned.
    async fn send_with<F>(&self, render: F) -> Result<MessageId, DisplayError>
    where
        F: FnOnce(MessageId) -> Result<String, DisplayError> + Send,
    {
        let mut state = self.state.lock().await;
        let id = MessageId(state.next_id);
        let text = render(id)?;
        state.write(&text).await?;
        state.next_id += 1;
        state.sent.insert(id);
        Ok(id)
    }

    /// Consume this messenger, and return its output stream.
    pub fn into_inner(self) -> W {
        self.state.into_inner().out
    }
}

impl<W> ConsoleState<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write(&mut self, text: &str) -> Result<(), DisplayError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<W> Messenger for ConsoleMessenger<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_card(&self, card: &Card) -> Result<MessageId, DisplayError> {
        self.send_with(|message_id| Ok(RankingWidget { message_id, card }.render()?))
            .await
    }

    async fn edit_card(&self, id: MessageId, card: &Card) -> Result<(), DisplayError> {
        let mut state = self.state.lock().await;
        if !state.sent.contains(&id) {
            return Err(DisplayError::Unreachable(id));
        }
        let text = RankingWidget {
            message_id: id,
            card,
        }
        .render()?;
        state.write(&format!("(edited)\n{}", text)).await
    }

    async fn send_help(&self) -> Result<MessageId, DisplayError> {
        self.send_with(|message_id| {
            let widget = HelpWidget {
                message_id,
                reference: COMMAND_REFERENCE,
            };
            Ok(widget.render()?)
        })
        .await
    }

    async fn send_text(&self, text: &str) -> Result<MessageId, DisplayError> {
        self.send_with(|message_id| Ok(format!("{} {}", message_id, text)))
            .await
    }
}
