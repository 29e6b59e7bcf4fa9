use super::DashboardQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, DashboardStatsDto},
        error::ApplicationResult,
    },
    domain::article::LowStockSpec,
};

impl DashboardQueryService {
    pub async fn stats(&self, actor: &AuthenticatedUser) -> ApplicationResult<DashboardStatsDto> {
        let articles = self.load_articles(actor).await?;
        let expiring = self.expiring_spec();

        let total_users = self.user_repo.count().await?;
        let requests = self.request_repo.count_by_status(None).await?;

        Ok(DashboardStatsDto {
            total_articles: articles.len() as u64,
            total_users,
            total_requests: requests.total(),
            articles_low_stock: articles
                .iter()
                .filter(|a| LowStockSpec.is_satisfied_by(a))
                .count() as u64,
            articles_expiring_soon: articles
                .iter()
                .filter(|a| expiring.is_satisfied_by(a))
                .count() as u64,
        })
    }
}
