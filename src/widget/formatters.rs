use serde::Serializer;

use crate::chat::MessageId;

/// Display message IDs the way they are entered in the console, f.e. '#12'.
pub(super) fn format_message_id<S>(id: &MessageId, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&id.to_string())
}
