// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleDescription, ArticleId, ArticleName, Quantity, StockLevel,
};
use crate::domain::errors::DomainResult;
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub name: ArticleName,
    pub description: ArticleDescription,
    pub quantity: StockLevel,
    pub min_quantity: StockLevel,
    pub expiration_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub qr_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    /// Days left before expiry, negative once expired.
    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        self.expiration_date
            .map(|date| date.signed_duration_since(today).num_days())
    }

    /// Remove `amount` from the stock on hand. Leaves the article untouched
    /// when there is not enough stock.
    pub fn debit(&mut self, amount: Quantity, now: DateTime<Utc>) -> DomainResult<()> {
        self.quantity = self.quantity.checked_sub(amount)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn credit(&mut self, amount: Quantity, now: DateTime<Utc>) -> DomainResult<()> {
        self.quantity = self.quantity.checked_add(amount)?;
        self.updated_at = now;
        Ok(())
    }
}

/// Payload encoded into the article QR code.
pub fn qr_payload(id: ArticleId, name: &ArticleName) -> String {
    format!("ARTICLE:{id}:{name}")
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub id: ArticleId,
    pub name: ArticleName,
    pub description: ArticleDescription,
    pub quantity: StockLevel,
    pub min_quantity: StockLevel,
    pub expiration_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub qr_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial edit. `None` keeps the stored value; the nested options on
/// `expiration_date` and `image` allow clearing them.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub name: Option<ArticleName>,
    pub description: Option<ArticleDescription>,
    pub quantity: Option<StockLevel>,
    pub min_quantity: Option<StockLevel>,
    pub expiration_date: Option<Option<NaiveDate>>,
    pub image: Option<Option<String>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            description: None,
            quantity: None,
            min_quantity: None,
            expiration_date: None,
            image: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_name(mut self, name: ArticleName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_description(mut self, description: ArticleDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_quantity(mut self, quantity: StockLevel) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_min_quantity(mut self, min_quantity: StockLevel) -> Self {
        self.min_quantity = Some(min_quantity);
        self
    }

    pub fn with_expiration_date(mut self, expiration_date: Option<NaiveDate>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.min_quantity.is_none()
            && self.expiration_date.is_none()
            && self.image.is_none()
    }

    /// Apply the edit to an in-memory copy.
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(name) = &self.name {
            article.name = name.clone();
        }
        if let Some(description) = &self.description {
            article.description = description.clone();
        }
        if let Some(quantity) = self.quantity {
            article.quantity = quantity;
        }
        if let Some(min_quantity) = self.min_quantity {
            article.min_quantity = min_quantity;
        }
        if let Some(expiration_date) = self.expiration_date {
            article.expiration_date = expiration_date;
        }
        if let Some(image) = &self.image {
            article.image = image.clone();
        }
        article.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use chrono::Duration;

    fn sample_article(quantity: i32, min_quantity: i32) -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::generate(),
            name: ArticleName::new("Widget").unwrap(),
            description: ArticleDescription::new("A widget").unwrap(),
            quantity: StockLevel::new(quantity).unwrap(),
            min_quantity: StockLevel::new(min_quantity).unwrap(),
            expiration_date: None,
            image: None,
            qr_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn debit_decrements_and_touches_timestamp() {
        let mut article = sample_article(10, 2);
        let later = article.updated_at + Duration::seconds(5);
        article.debit(Quantity::new(3).unwrap(), later).unwrap();
        assert_eq!(article.quantity.value(), 7);
        assert_eq!(article.updated_at, later);
    }

    #[test]
    fn debit_beyond_stock_leaves_article_untouched() {
        let mut article = sample_article(10, 2);
        let before = article.updated_at;
        let err = article
            .debit(Quantity::new(100).unwrap(), before + Duration::seconds(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert_eq!(article.quantity.value(), 10);
        assert_eq!(article.updated_at, before);
    }

    #[test]
    fn low_stock_is_inclusive() {
        assert!(sample_article(2, 2).is_low_stock());
        assert!(sample_article(0, 0).is_low_stock());
        assert!(!sample_article(3, 2).is_low_stock());
    }

    #[test]
    fn days_until_expiration_counts_calendar_days() {
        let mut article = sample_article(1, 0);
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(article.days_until_expiration(today), None);
        article.expiration_date = NaiveDate::from_ymd_opt(2025, 3, 11);
        assert_eq!(article.days_until_expiration(today), Some(10));
    }

    #[test]
    fn update_can_clear_optional_fields() {
        let mut article = sample_article(4, 1);
        article.image = Some("uploads/widget.png".into());
        let update = ArticleUpdate::new(article.id, article.updated_at)
            .with_image(None)
            .with_quantity(StockLevel::new(9).unwrap());
        update.apply_to(&mut article);
        assert!(article.image.is_none());
        assert_eq!(article.quantity.value(), 9);
    }

    #[test]
    fn qr_payload_embeds_id_and_name() {
        let article = sample_article(1, 0);
        let payload = qr_payload(article.id, &article.name);
        assert_eq!(payload, format!("ARTICLE:{}:Widget", article.id));
    }
}
