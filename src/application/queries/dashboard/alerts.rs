use super::DashboardQueryService;
use crate::application::{
    dto::{AlertDto, AlertKind, AuthenticatedUser},
    error::ApplicationResult,
};
use crate::domain::article::LowStockSpec;

impl DashboardQueryService {
    /// Low-stock alerts first, then expiry alerts.
    pub async fn alerts(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<AlertDto>> {
        let articles = self.load_articles(actor).await?;
        let now = self.clock.now();
        let today = self.clock.today();
        let expiring = self.expiring_spec();

        let low_stock = articles
            .iter()
            .filter(|a| LowStockSpec.is_satisfied_by(a))
            .map(|article| AlertDto {
                article_id: article.id.into(),
                name: article.name.to_string(),
                kind: AlertKind::StockLow,
                message: format!(
                    "low stock: {} left (min: {})",
                    article.quantity, article.min_quantity
                ),
                days_remaining: None,
                created_at: now,
            });

        let expiring_soon = articles
            .iter()
            .filter(|a| expiring.is_satisfied_by(a))
            .map(|article| {
                let days = article.days_until_expiration(today).unwrap_or_default();
                AlertDto {
                    article_id: article.id.into(),
                    name: article.name.to_string(),
                    kind: AlertKind::ExpiringSoon,
                    message: format!("expires in {days} days"),
                    days_remaining: Some(days),
                    created_at: now,
                }
            });

        Ok(low_stock.chain(expiring_soon).collect())
    }
}
