/// Chat commands.
#[derive(Debug, PartialEq, Eq)]
pub enum BotCommand<'a> {
    /// Print a reference of available commands.
    ///
    /// Usage: `/help`
    Help,

    /// Display the ranking of all groups.
    ///
    /// Usage: `/grouprank`
    GroupRank,

    /// Display the user ranking of a group.
    ///
    /// Usage: `/userrank <group name>`
    UserRank { group_name: &'a str },

    /// Display the all-time user ranking.
    ///
    /// Usage: `/alltime`
    AllTime,

    /// Display the user ranking of the current month.
    ///
    /// Usage: `/monthly`
    Monthly,
}

impl<'a> BotCommand<'a> {
    /// Parse a command. Returns `None` if the message is not a `/command`,
    /// or if its name or arguments are unknown.
    pub fn from(chat_message: &'a str) -> Option<BotCommand<'a>> {
        use BotCommand::*;

        let chat_message = chat_message.trim();

        // Group names can contain whitespace, so keep the rest of the line as is.
        if let Some(rest) = chat_message.strip_prefix("/userrank") {
            let group_name = rest.trim();
            if group_name.is_empty() || !rest.starts_with(char::is_whitespace) {
                return None;
            }
            return Some(UserRank { group_name });
        }

        let parts: Vec<&str> = chat_message.split_whitespace().collect();

        match &parts[..] {
            ["/help"] => Some(Help),
            ["/grouprank"] => Some(GroupRank),
            ["/alltime"] => Some(AllTime),
            ["/monthly"] => Some(Monthly),
            _ => None,
        }
    }
}

/// Command reference that can be printed in the chat.
pub const COMMAND_REFERENCE: &str = "\
/grouprank          Get WiGLE group rankings.
/userrank <group>   Get WiGLE user rankings for a group.
/alltime            Get WiGLE all-time user rankings.
/monthly            Get WiGLE monthly user rankings.
/help               Display this list.
Stats of a single user (/user <username>) are not available.";
