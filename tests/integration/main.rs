use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use wigle_bot::chat::{BotCommand, DisplayError, MessageId, Messenger};
use wigle_bot::config::Config;
use wigle_bot::controller::Controller;
use wigle_bot::network::*;
use wigle_bot::pager::{Card, NavAction, Transition};

/// Serves canned API responses.
#[derive(Default)]
struct FakeApi {
    groups: Vec<GroupStanding>,
    members: HashMap<GroupId, Vec<GroupMember>>,
    standings: Vec<UserStanding>,

    /// Makes every request fail with this status.
    fail_status: Option<u16>,

    /// How long every ranking request takes.
    delay: Duration,
    nb_member_calls: AtomicUsize,
}

#[async_trait]
impl StatsApi for FakeApi {
    async fn group_ranking(&self) -> Result<Vec<GroupStanding>, UpstreamError> {
        tokio::time::sleep(self.delay).await;
        match self.fail_status {
            Some(status) => Err(UpstreamError::Status(status)),
            None => Ok(self.groups.clone()),
        }
    }

    async fn group_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, UpstreamError> {
        self.nb_member_calls.fetch_add(1, Ordering::SeqCst);
        self.members
            .get(group_id)
            .cloned()
            .ok_or(UpstreamError::MissingKey("users"))
    }

    async fn user_standings(&self, _sort: StandingsSort) -> Result<Vec<UserStanding>, UpstreamError> {
        tokio::time::sleep(self.delay).await;
        match self.fail_status {
            Some(status) => Err(UpstreamError::Status(status)),
            None => Ok(self.standings.clone()),
        }
    }
}

/// Remembers every message in the order they were sent.
#[derive(Default)]
struct FakeChat {
    messages: Mutex<Vec<Sent>>,
}

#[derive(Debug, Clone)]
enum Sent {
    Card(Card),
    Help,
    Text(String),
}

impl FakeChat {
    async fn all(&self) -> Vec<Sent> {
        self.messages.lock().await.clone()
    }

    async fn card(&self, id: MessageId) -> Card {
        match &self.messages.lock().await[id.0 as usize] {
            Sent::Card(card) => card.clone(),
            other => panic!("expected a card, got {:?}", other),
        }
    }

    async fn push(&self, sent: Sent) -> MessageId {
        let mut messages = self.messages.lock().await;
        messages.push(sent);
        MessageId(messages.len() as u64 - 1)
    }
}

#[async_trait]
impl Messenger for FakeChat {
    async fn send_card(&self, card: &Card) -> Result<MessageId, DisplayError> {
        Ok(self.push(Sent::Card(card.clone())).await)
    }

    async fn edit_card(&self, id: MessageId, card: &Card) -> Result<(), DisplayError> {
        let mut messages = self.messages.lock().await;
        match messages.get_mut(id.0 as usize) {
            Some(Sent::Card(old)) => {
                *old = card.clone();
                Ok(())
            }
            _ => Err(DisplayError::Unreachable(id)),
        }
    }

    async fn send_help(&self) -> Result<MessageId, DisplayError> {
        Ok(self.push(Sent::Help).await)
    }

    async fn send_text(&self, text: &str) -> Result<MessageId, DisplayError> {
        Ok(self.push(Sent::Text(text.to_string())).await)
    }
}

fn setup(api: FakeApi) -> (Arc<FakeApi>, Arc<FakeChat>, Controller) {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config::from_toml("wigle_api_key = \"test\"").expect("invalid test config");
    let api = Arc::new(api);
    let chat = Arc::new(FakeChat::default());
    let controller = Controller::init(
        &config,
        api.clone() as Arc<dyn StatsApi>,
        chat.clone() as Arc<dyn Messenger>,
    );
    (api, chat, controller)
}

fn standing(name: &str, discovered: u64, this_month: u64) -> UserStanding {
    UserStanding {
        user_name: name.to_string(),
        discovered_wifi_gps: discovered,
        event_month_count: this_month,
    }
}

fn group(name: &str, id: &str, discovered: u64) -> GroupStanding {
    GroupStanding {
        group_name: name.to_string(),
        group_id: GroupId(id.to_string()),
        discovered,
    }
}

fn member(name: &str, discovered: u64, status: &str) -> GroupMember {
    GroupMember {
        username: name.to_string(),
        discovered,
        status: status.to_string(),
    }
}

/// 25 named users, and an anonymous one in between.
fn standings() -> Vec<UserStanding> {
    let mut standings: Vec<UserStanding> = (0..25)
        .map(|i| standing(&format!("user{}", i), 1_000_000 - i * 1000, 100 - i))
        .collect();
    standings.insert(3, standing("anonymous", 999_999, 99));
    standings
}

#[tokio::test(start_paused = true)]
async fn test_alltime_pages() {
    let (_, chat, controller) = setup(FakeApi {
        standings: standings(),
        ..FakeApi::default()
    });

    controller.on_command(BotCommand::from("/alltime")).await;
    let id = MessageId(0);

    let card = chat.card(id).await;
    assert_eq!("WiGLE All-Time User Rankings", card.payload.title);
    assert_eq!("1st: user0 | Total: 1,000,000", card.payload.lines[0]);
    assert_eq!("4th: user3 | Total: 997,000", card.payload.lines[3]);
    assert_eq!(3, card.payload.page_count);
    assert!(!card.controls.previous_enabled);
    assert!(card.controls.next_enabled);

    assert_eq!(Transition::Moved, controller.on_navigate(id, NavAction::Next).await);
    let card = chat.card(id).await;
    assert!(card.payload.lines[0].starts_with("11th: user10 "));
    assert!(card.controls.previous_enabled);
    assert!(card.controls.next_enabled);

    assert_eq!(Transition::Moved, controller.on_navigate(id, NavAction::Next).await);
    let card = chat.card(id).await;
    assert_eq!(5, card.payload.lines.len());
    assert!(card.payload.lines[0].starts_with("21st: "));
    assert!(card.payload.lines[4].starts_with("25th: user24 "));
    assert!(!card.controls.next_enabled);
    assert_eq!(Transition::Unchanged, controller.on_navigate(id, NavAction::Next).await);
}

#[tokio::test(start_paused = true)]
async fn test_monthly_metric() {
    let (_, chat, controller) = setup(FakeApi {
        standings: vec![standing("someone", 5, 1234567)],
        ..FakeApi::default()
    });

    controller.on_command(BotCommand::from("/monthly")).await;

    let card = chat.card(MessageId(0)).await;
    assert_eq!("WiGLE Monthly User Rankings", card.payload.title);
    assert_eq!(vec!["1st: someone | Total: 1,234,567".to_string()], card.payload.lines);
    assert!(!card.controls.previous_enabled);
    assert!(!card.controls.next_enabled);
    assert!(card.controls.reset_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_empty_group_ranking() {
    let (_, chat, controller) = setup(FakeApi::default());

    controller.on_command(BotCommand::from("/grouprank")).await;

    let card = chat.card(MessageId(0)).await;
    assert!(card.payload.lines.is_empty());
    assert_eq!(1, card.payload.page_number);
    assert_eq!(1, card.payload.page_count);
    assert!(!card.controls.previous_enabled);
    assert!(!card.controls.next_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_userrank_skips_departed_members() {
    let mut members = HashMap::new();
    members.insert(
        GroupId("g2".to_string()),
        vec![
            member("alice", 3000, "A"),
            member("bob", 2000, "L"),
            member("carol", 1000, ""),
        ],
    );
    let (api, chat, controller) = setup(FakeApi {
        groups: vec![group("Other", "g1", 10_000), group("Acme Crew", "g2", 6000)],
        members,
        ..FakeApi::default()
    });

    controller.on_command(BotCommand::from("/userrank Acme Crew")).await;

    let card = chat.card(MessageId(0)).await;
    assert_eq!("User Rankings for 'Acme Crew'", card.payload.title);
    assert_eq!(
        vec![
            "1st: alice | Total: 3,000".to_string(),
            "2nd: carol | Total: 1,000".to_string()
        ],
        card.payload.lines
    );
    assert_eq!(1, api.nb_member_calls.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_userrank_not_found() {
    let (api, chat, controller) = setup(FakeApi {
        groups: vec![group("acme", "g1", 10), group("ACME", "g2", 5)],
        ..FakeApi::default()
    });

    controller.on_command(BotCommand::from("/userrank Acme")).await;

    let sent = chat.all().await;
    assert_eq!(1, sent.len());
    match &sent[0] {
        Sent::Text(text) => assert_eq!("No group named 'Acme' found.", text),
        other => panic!("expected a text message, got {:?}", other),
    }
    assert_eq!(0, api.nb_member_calls.load(Ordering::SeqCst));
    assert_eq!(0, controller.nb_live_rankings().await);
}

#[tokio::test(start_paused = true)]
async fn test_upstream_error() {
    let (_, chat, controller) = setup(FakeApi {
        fail_status: Some(500),
        ..FakeApi::default()
    });

    controller.on_command(BotCommand::from("/grouprank")).await;

    let sent = chat.all().await;
    assert_eq!(1, sent.len());
    match &sent[0] {
        Sent::Text(text) => assert_eq!("Failed to fetch group ranks: HTTP error 500", text),
        other => panic!("expected a text message, got {:?}", other),
    }
    assert_eq!(0, controller.nb_live_rankings().await);
}

#[tokio::test(start_paused = true)]
async fn test_help_and_unknown_command() {
    let (_, chat, controller) = setup(FakeApi::default());

    controller.on_command(BotCommand::from("/help")).await;
    controller.on_command(BotCommand::from("/user someone")).await;

    let sent = chat.all().await;
    assert!(matches!(sent[0], Sent::Help));
    match &sent[1] {
        Sent::Text(text) => assert!(text.starts_with("Unknown command.")),
        other => panic!("expected a text message, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_controls_expire() {
    let (_, chat, controller) = setup(FakeApi {
        standings: standings(),
        ..FakeApi::default()
    });

    controller.on_command(BotCommand::from("/alltime")).await;
    let id = MessageId(0);
    controller.on_navigate(id, NavAction::Next).await;
    assert_eq!(1, controller.nb_live_rankings().await);

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(Transition::Locked, controller.on_navigate(id, NavAction::Previous).await);
    let card = chat.card(id).await;
    assert!(card.controls.locked);
    assert!(!card.controls.previous_enabled);
    assert!(!card.controls.next_enabled);
    assert!(!card.controls.reset_enabled);
    assert_eq!(2, card.payload.page_number);
    assert_eq!(0, controller.nb_live_rankings().await);
}

#[tokio::test(start_paused = true)]
async fn test_closed_input_finishes_commands() {
    let (_, chat, controller) = setup(FakeApi {
        fail_status: Some(503),
        delay: Duration::from_secs(5),
        ..FakeApi::default()
    });

    controller.serve(&b"/grouprank\n"[..]).await.unwrap();

    let sent = chat.all().await;
    assert_eq!(1, sent.len());
    match &sent[0] {
        Sent::Text(text) => assert_eq!("Failed to fetch group ranks: HTTP error 503", text),
        other => panic!("expected a text message, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_closed_input_locks_rankings() {
    let (_, chat, controller) = setup(FakeApi {
        standings: standings(),
        delay: Duration::from_secs(1),
        ..FakeApi::default()
    });

    controller
        .serve(&b"/alltime\nhello there\n#0 next\n"[..])
        .await
        .unwrap();

    // The press is read before the ranking is sent, so it finds no live controls.
    let card = chat.card(MessageId(0)).await;
    assert_eq!(1, card.payload.page_number);
    assert!(card.controls.locked);
    assert!(!card.controls.reset_enabled);
    assert_eq!(0, controller.nb_live_rankings().await);
}
