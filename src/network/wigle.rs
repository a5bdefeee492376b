use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::network::{GroupId, GroupMember, GroupStanding, StandingsSort, StatsApi, UpstreamError, UserStanding};

/// Client for the WiGLE stats API.
///
/// Reference: https://api.wigle.net/swagger
pub struct WigleClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Deserialize, Debug)]
struct GroupRankResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    groups: Option<Vec<GroupStanding>>,
}

#[derive(Deserialize, Debug)]
struct GroupMembersResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    users: Option<Vec<GroupMember>>,
}

#[derive(Deserialize, Debug)]
struct StandingsResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    results: Option<Vec<UserStanding>>,
}

/// Every response has a `success` flag. Without it being set, or without
/// the expected data, we cannot tell an empty ranking from a failed request.
fn checked<T>(
    success: bool,
    message: Option<String>,
    body: Option<T>,
    key: &'static str,
) -> Result<T, UpstreamError> {
    if !success {
        let message = message.unwrap_or_else(|| "the API did not report success".to_string());
        return Err(UpstreamError::Rejected(message));
    }
    body.ok_or(UpstreamError::MissingKey(key))
}

impl WigleClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(WigleClient {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.wigle_api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.api_url, path)
    }

    /// Query parameter that prevents cached responses.
    fn nocache() -> (&'static str, String) {
        ("nocache", chrono::Utc::now().timestamp().to_string())
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        log::debug!("GET {} {:?}", &url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(AUTHORIZATION, format!("Basic {}", &self.api_key))
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("GET {} failed: {}", &url, status);
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let json: String = response.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl StatsApi for WigleClient {
    async fn group_ranking(&self) -> Result<Vec<GroupStanding>, UpstreamError> {
        let resp: GroupRankResponse = self.get_json("stats/group", &[Self::nocache()]).await?;
        checked(resp.success, resp.message, resp.groups, "groups")
    }

    async fn group_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, UpstreamError> {
        let query = [("groupid", group_id.0.clone())];
        let resp: GroupMembersResponse = self.get_json("group/groupMembers", &query).await?;
        checked(resp.success, resp.message, resp.users, "users")
    }

    async fn user_standings(&self, sort: StandingsSort) -> Result<Vec<UserStanding>, UpstreamError> {
        let query = [
            ("sort", sort.query_value().to_string()),
            ("pagestart", "0".to_string()),
        ];
        let resp: StandingsResponse = self.get_json("stats/standings", &query).await?;
        checked(resp.success, resp.message, resp.results, "results")
    }
}
