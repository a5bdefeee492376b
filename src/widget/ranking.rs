use serde::Serialize;

use crate::chat::MessageId;
use crate::pager::Card;
use crate::widget::formatters::format_message_id;
use crate::widget::Widget;

/// A page of a ranking, followed by the buttons to navigate it.
///
/// # Sending
/// - Send this widget when a ranking was fetched.
/// - Re-send it with the same ID after every page change, and once
///   more when its controls expire.
#[derive(Serialize, Debug)]
pub struct RankingWidget<'a> {
    #[serde(serialize_with = "format_message_id")]
    pub message_id: MessageId,

    pub card: &'a Card,
}

impl Widget for RankingWidget<'_> {
    const FILE: &'static str = "ranking.j2";
}
