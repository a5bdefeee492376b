use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

pub use pager::PagerController;

use crate::chat::{BotCommand, BotMessage, ConsoleInput, MessageId, Messenger};
use crate::config::Config;
use crate::network::{
    ApiError, GroupMember, GroupResolver, GroupStanding, StandingsSort, StatsApi, UserStanding,
};
use crate::pager::{NavAction, Transition};
use crate::ranking::RankedList;

mod pager;

/// This facade reacts to commands and button presses from the chat.
#[derive(Clone)]
pub struct Controller {
    api: Arc<dyn StatsApi>,
    messenger: Arc<dyn Messenger>,
    pagers: PagerController,
}

/// A ranking that can be fetched with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankingKind<'a> {
    Groups,
    GroupMembers { group_name: &'a str },
    AllTime,
    Monthly,
}

impl RankingKind<'_> {
    fn title(&self) -> String {
        match self {
            RankingKind::Groups => "WiGLE Group Rankings".to_string(),
            RankingKind::GroupMembers { group_name } => format!("User Rankings for '{}'", group_name),
            RankingKind::AllTime => "WiGLE All-Time User Rankings".to_string(),
            RankingKind::Monthly => "WiGLE Monthly User Rankings".to_string(),
        }
    }

    /// What to call this ranking in failure messages.
    fn description(&self) -> &'static str {
        match self {
            RankingKind::Groups => "group ranks",
            RankingKind::GroupMembers { .. } => "group members",
            RankingKind::AllTime => "user ranks",
            RankingKind::Monthly => "monthly user rankings",
        }
    }
}

impl Controller {
    pub fn init(config: &Config, api: Arc<dyn StatsApi>, messenger: Arc<dyn Messenger>) -> Self {
        let pagers = PagerController::init(&messenger, config.pager_timeout());
        Controller {
            api,
            messenger,
            pagers,
        }
    }

    /// Respond to a chat command; `None` for messages that looked like
    /// a command, but could not be parsed.
    pub async fn on_command(&self, cmd: Option<BotCommand<'_>>) {
        use BotCommand::*;

        let kind = match cmd {
            None => {
                self.send_text(&BotMessage::UnknownCommand.to_string()).await;
                return;
            }
            Some(Help) => {
                if let Err(err) = self.messenger.send_help().await {
                    log::error!("failed to send help: {}", err);
                }
                return;
            }
            Some(GroupRank) => RankingKind::Groups,
            Some(UserRank { group_name }) => RankingKind::GroupMembers { group_name },
            Some(AllTime) => RankingKind::AllTime,
            Some(Monthly) => RankingKind::Monthly,
        };

        log::info!("fetch {:?}", kind);
        match self.fetch(kind).await {
            Ok(list) => {
                if list.is_empty() {
                    log::info!("{:?} has no records", kind);
                } else {
                    log::info!("{:?} has {} record(s)", kind, list.len());
                }
                if let Err(err) = self.pagers.create(list, kind.title()).await {
                    log::error!("failed to send {:?}: {}", kind, err);
                }
            }
            Err(error) => {
                log::warn!("failed to fetch {:?}: {}", kind, error);
                let msg = BotMessage::FetchFailed {
                    what: kind.description(),
                    error: &error,
                };
                self.send_text(&msg.to_string()).await;
            }
        }
    }

    /// Respond to a button press below a ranking.
    pub async fn on_navigate(&self, message: MessageId, action: NavAction) -> Transition {
        let transition = self.pagers.navigate(message, action).await;
        log::debug!("{:?} on ranking {}: {:?}", action, message, transition);
        transition
    }

    /// Handle chat input line by line, until it is closed.
    ///
    /// Button presses are applied in the order they are read, while
    /// commands are handled concurrently. Before returning, every pending
    /// command is finished, and every live ranking is locked.
    pub async fn serve<R>(&self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut commands = JoinSet::new();
        let mut lines = input.lines();

        let result = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            };

            if let ConsoleInput::Press { message, action } = ConsoleInput::parse(&line) {
                self.on_navigate(message, action).await;
                continue;
            }

            if !line.trim_start().starts_with('/') {
                continue;
            }

            // Fetching a ranking may take a while; keep reading input in the meantime.
            let controller = self.clone();
            commands.spawn(async move {
                if let ConsoleInput::Command(cmd) = ConsoleInput::parse(&line) {
                    controller.on_command(cmd).await;
                }
            });
        };

        log::info!("input closed, finishing {} command(s)", commands.len());
        while let Some(joined) = commands.join_next().await {
            if let Err(err) = joined {
                log::error!("command failed: {}", err);
            }
        }
        self.pagers.expire_all().await;

        result
    }

    /// The number of rankings with live controls.
    pub async fn nb_live_rankings(&self) -> usize {
        self.pagers.nb_live().await
    }

    async fn fetch(&self, kind: RankingKind<'_>) -> Result<RankedList, ApiError> {
        let list = match kind {
            RankingKind::Groups => {
                let groups = self.api.group_ranking().await?;
                RankedList::from_entries(groups, |g: GroupStanding| g.to_ranked())
            }
            RankingKind::GroupMembers { group_name } => {
                let members = GroupResolver::new(&*self.api).resolve(group_name).await?;
                RankedList::from_entries(members, |m: GroupMember| m.to_ranked())
            }
            RankingKind::AllTime => self.fetch_standings(StandingsSort::Discovered).await?,
            RankingKind::Monthly => self.fetch_standings(StandingsSort::MonthCount).await?,
        };
        Ok(list)
    }

    async fn fetch_standings(&self, sort: StandingsSort) -> Result<RankedList, ApiError> {
        let standings = self.api.user_standings(sort).await?;
        Ok(RankedList::from_entries(standings, |s: UserStanding| s.to_ranked(sort)))
    }

    async fn send_text(&self, text: &str) {
        if let Err(err) = self.messenger.send_text(text).await {
            log::error!("failed to send message: {}", err);
        }
    }
}
