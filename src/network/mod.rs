use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use resolver::*;
pub use wigle::*;

use crate::constants::{ANONYMOUS_USER, DEPARTED_STATUS_FLAG};
use crate::ranking::RankedRecord;

mod resolver;
mod wigle;

/// Access to the remote stats API.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// The ranking of all groups, sorted from best to worst.
    async fn group_ranking(&self) -> Result<Vec<GroupStanding>, UpstreamError>;

    /// The members of a group, sorted from best to worst.
    async fn group_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, UpstreamError>;

    /// The top of the user ranking, sorted by the given metric.
    async fn user_standings(&self, sort: StandingsSort) -> Result<Vec<UserStanding>, UpstreamError>;
}

/// Possible errors when querying the stats API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Wrong endpoint, wrong credentials, or maybe not available right now.
    #[error("HTTP error {0}")]
    Status(u16),

    /// Failed to connect, or to read a response.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Likely a bug on our end, or a changed API.
    #[error("failed to parse API response")]
    Parse(#[from] serde_json::Error),

    /// The response did not indicate success.
    #[error("{0}")]
    Rejected(String),

    /// The response indicated success, but lacked its data.
    #[error("API response is missing '{0}'")]
    MissingKey(&'static str),
}

/// Errors of lookups that might fail for reasons other than the API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// There is no group with the requested name.
    #[error("No group named '{0}' found.")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// A group's ID. The API is inconsistent in whether
/// it is a string, or a number.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "RawGroupId")]
pub struct GroupId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGroupId {
    Text(String),
    Number(u64),
}

impl From<RawGroupId> for GroupId {
    fn from(raw: RawGroupId) -> Self {
        match raw {
            RawGroupId::Text(s) => GroupId(s),
            RawGroupId::Number(n) => GroupId(n.to_string()),
        }
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entry of the group ranking.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupStanding {
    pub group_name: String,
    pub group_id: GroupId,

    /// The number of networks discovered by the group's members.
    pub discovered: u64,
}

impl GroupStanding {
    pub fn to_ranked(&self) -> RankedRecord {
        RankedRecord::new(self.group_name.clone(), self.discovered)
    }
}

/// An entry of a group's user ranking.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GroupMember {
    pub username: String,
    pub discovered: u64,

    /// Membership flags, f.e. "L" for members that left.
    #[serde(default)]
    pub status: String,
}

impl GroupMember {
    pub fn has_left(&self) -> bool {
        self.status.contains(DEPARTED_STATUS_FLAG)
    }

    pub fn to_ranked(&self) -> RankedRecord {
        RankedRecord::new(self.username.clone(), self.discovered).excluded_if(self.has_left())
    }
}

/// An entry of the global user ranking.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserStanding {
    pub user_name: String,

    #[serde(rename = "discoveredWiFiGPS")]
    pub discovered_wifi_gps: u64,

    pub event_month_count: u64,
}

impl UserStanding {
    pub fn is_anonymous(&self) -> bool {
        self.user_name == ANONYMOUS_USER
    }

    /// Rank this user by the metric matching the sort order
    /// of the standings it was taken from.
    pub fn to_ranked(&self, sort: StandingsSort) -> RankedRecord {
        let metric = match sort {
            StandingsSort::Discovered => self.discovered_wifi_gps,
            StandingsSort::MonthCount => self.event_month_count,
        };
        RankedRecord::new(self.user_name.clone(), metric).excluded_if(self.is_anonymous())
    }
}

/// Sort orders of the user standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsSort {
    /// All-time discoveries.
    Discovered,

    /// Events of the current month.
    MonthCount,
}

impl StandingsSort {
    pub fn query_value(self) -> &'static str {
        match self {
            StandingsSort::Discovered => "discovered",
            StandingsSort::MonthCount => "monthcount",
        }
    }
}
