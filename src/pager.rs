use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::ranking::RankedList;

/// Navigation actions, triggered by the buttons below a ranking.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum NavAction {
    Previous,
    Next,
    Reset,
}

/// The outcome of a navigation action.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Transition {
    /// The action was applied, and the ranking has to be re-rendered.
    Moved,

    /// The action did not change the page.
    Unchanged,

    /// The pager is locked, either already, or because its
    /// deadline passed before this action.
    Locked,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum PagerState {
    Active { page: usize },

    /// A locked pager still displays the last page it was on.
    Locked { page: usize },
}

/// The contents of a ranking message.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DisplayPayload {
    pub title: String,

    /// Formatted ranks, f.e. "11th: wardriver | Total: 1,234".
    pub lines: Vec<String>,

    /// The displayed page, starting at 1.
    pub page_number: usize,

    pub page_count: usize,
}

/// The state of the buttons below a ranking message.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub reset_enabled: bool,
    pub locked: bool,
}

impl ControlState {
    pub fn is_enabled(&self, action: NavAction) -> bool {
        match action {
            NavAction::Previous => self.previous_enabled,
            NavAction::Next => self.next_enabled,
            NavAction::Reset => self.reset_enabled,
        }
    }
}

/// Everything needed to display, or update a ranking message.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub payload: DisplayPayload,
    pub controls: ControlState,
}

/// A browsable view of a ranking, bound to a single message.
///
/// The pager locks once its deadline passes, which is fixed
/// when the pager is created. Actions are evaluated against that
/// deadline when they are applied, so that an action arriving late
/// never moves the page, even if no timer has locked the pager yet.
#[derive(Debug)]
pub struct Pager {
    list: RankedList,
    title: String,
    state: PagerState,
    deadline: Instant,
}

impl Pager {
    pub fn new(list: RankedList, title: impl Into<String>, created: Instant, timeout: Duration) -> Self {
        Pager {
            list,
            title: title.into(),
            state: PagerState::Active { page: 0 },
            deadline: created + timeout,
        }
    }

    /// The zero-based index of the displayed page.
    pub fn page(&self) -> usize {
        match self.state {
            PagerState::Active { page } | PagerState::Locked { page } => page,
        }
    }

    pub fn max_page(&self) -> usize {
        self.list.max_page()
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, PagerState::Locked { .. })
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Apply a navigation action at the given point in time.
    pub fn navigate(&mut self, action: NavAction, now: Instant) -> Transition {
        let page = match self.state {
            PagerState::Locked { .. } => return Transition::Locked,
            PagerState::Active { page } => page,
        };

        if self.is_expired(now) {
            self.lock();
            return Transition::Locked;
        }

        if !self.controls().is_enabled(action) {
            return Transition::Unchanged;
        }

        let next_page = match action {
            NavAction::Previous => page - 1,
            NavAction::Next => page + 1,
            NavAction::Reset => 0,
        };

        self.state = PagerState::Active { page: next_page };
        Transition::Moved
    }

    /// Lock this pager, and return `true` if it was not locked before.
    pub fn lock(&mut self) -> bool {
        match self.state {
            PagerState::Locked { .. } => false,
            PagerState::Active { page } => {
                self.state = PagerState::Locked { page };
                true
            }
        }
    }

    pub fn controls(&self) -> ControlState {
        match self.state {
            PagerState::Locked { .. } => ControlState {
                previous_enabled: false,
                next_enabled: false,
                reset_enabled: false,
                locked: true,
            },
            PagerState::Active { page } => ControlState {
                previous_enabled: page > 0,
                next_enabled: page < self.max_page(),
                reset_enabled: true,
                locked: false,
            },
        }
    }

    pub fn payload(&self) -> DisplayPayload {
        let page = self.list.render_page(self.page(), &self.title);
        DisplayPayload {
            title: page.title,
            lines: page.rows.iter().map(ToString::to_string).collect(),
            page_number: self.page() + 1,
            page_count: self.list.page_count(),
        }
    }

    pub fn card(&self) -> Card {
        Card {
            payload: self.payload(),
            controls: self.controls(),
        }
    }
}
