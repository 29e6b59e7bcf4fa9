use std::sync::Arc;

use crate::{
    application::{
        commands::capability::ensure_capability, dto::AuthenticatedUser,
        error::ApplicationResult, ports::time::Clock,
    },
    domain::{
        article::{Article, ArticleReadRepository, ExpiringSoonSpec},
        stock_request::StockRequestRepository,
        user::UserRepository,
    },
};

pub struct DashboardQueryService {
    pub(super) article_repo: Arc<dyn ArticleReadRepository>,
    pub(super) request_repo: Arc<dyn StockRequestRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) expiry_alert_days: i64,
}

impl DashboardQueryService {
    pub fn new(
        article_repo: Arc<dyn ArticleReadRepository>,
        request_repo: Arc<dyn StockRequestRepository>,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        expiry_alert_days: i64,
    ) -> Self {
        Self {
            article_repo,
            request_repo,
            user_repo,
            clock,
            expiry_alert_days,
        }
    }

    pub(super) async fn load_articles(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<Article>> {
        ensure_capability(actor, "dashboard", "read")?;
        Ok(self.article_repo.list_all().await?)
    }

    pub(super) fn expiring_spec(&self) -> ExpiringSoonSpec {
        ExpiringSoonSpec::new(self.clock.today(), self.expiry_alert_days)
    }
}
