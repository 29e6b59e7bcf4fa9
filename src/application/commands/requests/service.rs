// src/application/commands/requests/service.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::retry::RetryPolicy,
        error::ApplicationResult,
        ports::time::Clock,
        queries::labels::{DELETED_ARTICLE_LABEL, UNKNOWN_USER_LABEL},
    },
    domain::{
        activity::ActivityLogRepository,
        article::{ArticleId, ArticleReadRepository},
        ledger::StockLedger,
        stock_request::{RequestStatus, StockRequest, StockRequestId, StockRequestRepository},
        user::{UserId, UserRepository},
    },
};

pub struct StockRequestCommandService {
    pub(super) request_repo: Arc<dyn StockRequestRepository>,
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) activity_repo: Arc<dyn ActivityLogRepository>,
    pub(super) ledger: Arc<dyn StockLedger>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) retry: RetryPolicy,
}

impl StockRequestCommandService {
    pub fn new(
        request_repo: Arc<dyn StockRequestRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        user_repo: Arc<dyn UserRepository>,
        activity_repo: Arc<dyn ActivityLogRepository>,
        ledger: Arc<dyn StockLedger>,
        clock: Arc<dyn Clock>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            request_repo,
            article_repo,
            user_repo,
            activity_repo,
            ledger,
            clock,
            retry,
        }
    }

    pub(super) async fn requester_name(&self, id: UserId) -> ApplicationResult<String> {
        Ok(self
            .user_repo
            .find_by_id(id)
            .await?
            .map(|user| user.name.to_string())
            .unwrap_or_else(|| UNKNOWN_USER_LABEL.to_string()))
    }

    pub(super) async fn article_name(&self, id: ArticleId) -> ApplicationResult<String> {
        Ok(self
            .article_repo
            .find_by_id(id)
            .await?
            .map(|article| article.name.into_inner())
            .unwrap_or_else(|| DELETED_ARTICLE_LABEL.to_string()))
    }

    /// An attempt can time out after its transaction committed, so the retry
    /// finds the request already decided. When the stored decision is the one
    /// this actor asked for, the retry reports it instead of a conflict.
    pub(super) async fn decided_by(
        &self,
        id: StockRequestId,
        status: RequestStatus,
        actor: UserId,
    ) -> ApplicationResult<Option<StockRequest>> {
        Ok(self
            .request_repo
            .find_by_id(id)
            .await?
            .filter(|request| request.status == status && request.decided_by == Some(actor)))
    }
}
