use crate::domain::article::ArticleId;
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use crate::domain::stock_request::entity::{NewStockRequest, StockRequest};
use crate::domain::stock_request::value_objects::{RequestStatus, StockRequestId};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct StockRequestFilter {
    pub requester: Option<UserId>,
    pub status: Option<RequestStatus>,
    pub article_id: Option<ArticleId>,
}

impl StockRequestFilter {
    pub fn matches(&self, request: &StockRequest) -> bool {
        self.requester.is_none_or(|id| request.requester_id == id)
            && self.status.is_none_or(|status| request.status == status)
            && self.article_id.is_none_or(|id| request.article_id == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected
    }

    pub fn add(&mut self, status: RequestStatus, count: u64) {
        match status {
            RequestStatus::Pending => self.pending += count,
            RequestStatus::Approved => self.approved += count,
            RequestStatus::Rejected => self.rejected += count,
        }
    }

    pub fn get(&self, status: RequestStatus) -> u64 {
        match status {
            RequestStatus::Pending => self.pending,
            RequestStatus::Approved => self.approved,
            RequestStatus::Rejected => self.rejected,
        }
    }
}

/// Request persistence. Status changes only happen through the stock ledger.
#[async_trait]
pub trait StockRequestRepository: Send + Sync {
    async fn insert(&self, request: NewStockRequest) -> DomainResult<StockRequest>;
    async fn find_by_id(&self, id: StockRequestId) -> DomainResult<Option<StockRequest>>;
    /// Ordered by `created_at`.
    async fn list_page(
        &self,
        filter: &StockRequestFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<StockRequest>>;
    async fn count_by_status(&self, requester: Option<UserId>) -> DomainResult<StatusCounts>;
}
