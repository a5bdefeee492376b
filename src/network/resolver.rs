use crate::network::{ApiError, GroupMember, GroupStanding, StatsApi};

/// Looks up the members of a group by the group's name.
///
/// The API cannot list members by group name, so this takes two
/// round trips: the group ranking is searched for the name, and the
/// ID of the match is used to request the member list.
pub struct GroupResolver<'a> {
    api: &'a dyn StatsApi,
}

impl<'a> GroupResolver<'a> {
    pub fn new(api: &'a dyn StatsApi) -> Self {
        GroupResolver { api }
    }

    /// Find a group by its exact, case-sensitive name.
    pub async fn lookup(&self, group_name: &str) -> Result<GroupStanding, ApiError> {
        self.api
            .group_ranking()
            .await?
            .into_iter()
            .find(|group| group.group_name == group_name)
            .ok_or_else(|| ApiError::NotFound(group_name.to_string()))
    }

    /// Fetch the member list of the group with the given name.
    pub async fn resolve(&self, group_name: &str) -> Result<Vec<GroupMember>, ApiError> {
        let group = self.lookup(group_name).await?;
        log::debug!("resolved group '{}' to id {}", group_name, &group.group_id);
        Ok(self.api.group_members(&group.group_id).await?)
    }
}
