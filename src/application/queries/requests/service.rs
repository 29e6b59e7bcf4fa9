use std::sync::Arc;

use crate::{
    application::{
        commands::capability,
        dto::{AuthenticatedUser, StockRequestDto},
        error::ApplicationResult,
        queries::labels::LabelIndex,
    },
    domain::{
        article::ArticleReadRepository,
        stock_request::{StockRequest, StockRequestRepository},
        user::{UserId, UserRepository},
    },
};

pub struct StockRequestQueryService {
    pub(super) request_repo: Arc<dyn StockRequestRepository>,
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl StockRequestQueryService {
    pub fn new(
        request_repo: Arc<dyn StockRequestRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            request_repo,
            article_repo,
            user_repo,
        }
    }

    /// `None` means every request is visible; otherwise only the actor's own.
    pub(super) fn visibility_scope(
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Option<UserId>> {
        capability::visibility_scope(actor, "requests")
    }

    pub(super) async fn labelled(
        &self,
        requests: Vec<StockRequest>,
    ) -> ApplicationResult<Vec<StockRequestDto>> {
        let labels = LabelIndex::load(
            self.article_repo.as_ref(),
            self.user_repo.as_ref(),
            requests.iter().map(|r| r.article_id),
            requests.iter().map(|r| r.requester_id),
        )
        .await?;

        Ok(requests
            .into_iter()
            .map(|request| {
                let article_name = labels.article_name(request.article_id);
                let requester_name = labels.user_name(request.requester_id);
                StockRequestDto::from_parts(request, article_name, requester_name)
            })
            .collect())
    }
}
