use std::collections::{BTreeSet, HashMap};

use super::ActivityQueryService;
use crate::{
    application::{
        commands::capability::visibility_scope,
        dto::{ActivityDto, AuthenticatedUser, PageDto},
        error::ApplicationResult,
        queries::labels::UNKNOWN_USER_LABEL,
    },
    domain::{
        activity::{ActivityFilter, TargetType},
        pagination::{PageRequest, SortOrder},
    },
};

#[derive(Debug, Default)]
pub struct ListActivityQuery {
    pub page: u32,
    pub limit: u32,
    pub target_type: Option<TargetType>,
    pub sort_order: Option<String>,
}

impl ActivityQueryService {
    /// Admins read the whole history; everyone else only their own entries.
    pub async fn list_activity(
        &self,
        actor: &AuthenticatedUser,
        query: ListActivityQuery,
    ) -> ApplicationResult<PageDto<ActivityDto>> {
        let filter = ActivityFilter {
            user_id: visibility_scope(actor, "activity")?,
            target_type: query.target_type,
        };
        let order = query
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let records = self
            .activity_repo
            .list_page(&filter, order, PageRequest::new(query.page, query.limit))
            .await?;

        let user_ids: Vec<_> = records
            .items
            .iter()
            .map(|entry| entry.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names: HashMap<_, _> = self
            .user_repo
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.name.to_string()))
            .collect();

        Ok(PageDto::from_page(records, |entry| {
            let user_name = names
                .get(&entry.user_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_USER_LABEL.to_string());
            ActivityDto::from_parts(entry, user_name)
        }))
    }
}
