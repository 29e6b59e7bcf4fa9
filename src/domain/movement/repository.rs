use crate::domain::article::ArticleId;
use crate::domain::errors::DomainResult;
use crate::domain::movement::entity::{Movement, MovementKind};
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub article_id: Option<ArticleId>,
    pub kind: Option<MovementKind>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &Movement) -> bool {
        self.article_id.is_none_or(|id| movement.article_id == id)
            && self.kind.is_none_or(|kind| movement.kind == kind)
    }
}

/// Read side of the ledger. Lines are appended by `StockLedger` only.
#[async_trait]
pub trait MovementRepository: Send + Sync {
    async fn list_page(
        &self,
        filter: &MovementFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<Movement>>;
}
