use crate::domain::activity::entity::{ActivityLogEntry, NewActivity, TargetType};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub user_id: Option<UserId>,
    pub target_type: Option<TargetType>,
}

impl ActivityFilter {
    pub fn matches(&self, entry: &ActivityLogEntry) -> bool {
        self.user_id.is_none_or(|id| entry.user_id == id)
            && self.target_type.is_none_or(|t| entry.target_type == t)
    }
}

/// Append-only history of mutating operations.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, entry: NewActivity) -> DomainResult<ActivityLogEntry>;
    async fn list_page(
        &self,
        filter: &ActivityFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<ActivityLogEntry>>;
}
