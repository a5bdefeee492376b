use serde::Serialize;

use crate::chat::MessageId;
use crate::widget::formatters::format_message_id;
use crate::widget::Widget;

/// Lists the available commands.
#[derive(Serialize, Debug)]
pub struct HelpWidget<'a> {
    #[serde(serialize_with = "format_message_id")]
    pub message_id: MessageId,

    pub reference: &'a str,
}

impl Widget for HelpWidget<'_> {
    const FILE: &'static str = "help.j2";
}
