use std::collections::BTreeMap;

use super::DashboardQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ChartsDto, StockLevelPoint},
        error::ApplicationResult,
    },
    domain::{article::Article, stock_request::RequestStatus},
};

pub const STOCK_LEVEL_POINTS: usize = 10;

impl DashboardQueryService {
    pub async fn charts(&self, actor: &AuthenticatedUser) -> ApplicationResult<ChartsDto> {
        let mut articles = self.load_articles(actor).await?;
        let counts = self.request_repo.count_by_status(None).await?;

        let requests_by_status = RequestStatus::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), counts.get(*status)))
            .collect();

        let articles_by_category = articles_by_category(&articles);

        articles.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        let stock_levels = articles
            .into_iter()
            .take(STOCK_LEVEL_POINTS)
            .map(|article| StockLevelPoint {
                name: article.name.into_inner(),
                quantity: article.quantity.value(),
                min_quantity: article.min_quantity.value(),
            })
            .collect();

        Ok(ChartsDto {
            articles_by_category,
            requests_by_status,
            stock_levels,
        })
    }
}

/// Articles are bucketed by the upper-cased first letter of their name.
fn articles_by_category(articles: &[Article]) -> BTreeMap<String, u64> {
    let mut buckets = BTreeMap::new();
    for article in articles {
        let key = article
            .name
            .as_str()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| "A".to_string());
        *buckets.entry(key).or_insert(0) += 1;
    }
    buckets
}
