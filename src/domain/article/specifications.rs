use chrono::NaiveDate;

use crate::domain::article::entity::Article;

/// Quantity on hand at or below the alert threshold.
pub struct LowStockSpec;

impl LowStockSpec {
    pub fn is_satisfied_by(&self, article: &Article) -> bool {
        article.is_low_stock()
    }
}

/// Expires within `window_days` of `today`. Already expired articles do not
/// match.
pub struct ExpiringSoonSpec {
    today: NaiveDate,
    window_days: i64,
}

impl ExpiringSoonSpec {
    pub fn new(today: NaiveDate, window_days: i64) -> Self {
        Self { today, window_days }
    }

    pub fn is_satisfied_by(&self, article: &Article) -> bool {
        article
            .days_until_expiration(self.today)
            .is_some_and(|days| (0..=self.window_days).contains(&days))
    }
}

/// Case-insensitive substring match on name or description.
pub struct SearchSpec {
    needle: String,
}

impl SearchSpec {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn is_satisfied_by(&self, article: &Article) -> bool {
        article.name.as_str().to_lowercase().contains(&self.needle)
            || article
                .description
                .as_str()
                .to_lowercase()
                .contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::value_objects::{
        ArticleDescription, ArticleId, ArticleName, StockLevel,
    };
    use chrono::{TimeZone, Utc};

    fn article(expiration_date: Option<NaiveDate>) -> Article {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Article {
            id: ArticleId::generate(),
            name: ArticleName::new("Saline solution").unwrap(),
            description: ArticleDescription::new("Sterile, 500ml").unwrap(),
            quantity: StockLevel::new(12).unwrap(),
            min_quantity: StockLevel::new(5).unwrap(),
            expiration_date,
            image: None,
            qr_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn expiring_soon_window_is_inclusive_and_skips_expired() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let spec = ExpiringSoonSpec::new(today, 30);

        assert!(spec.is_satisfied_by(&article(Some(today))));
        assert!(spec.is_satisfied_by(&article(NaiveDate::from_ymd_opt(2025, 3, 31))));
        assert!(!spec.is_satisfied_by(&article(NaiveDate::from_ymd_opt(2025, 4, 1))));
        assert!(!spec.is_satisfied_by(&article(NaiveDate::from_ymd_opt(2025, 2, 28))));
        assert!(!spec.is_satisfied_by(&article(None)));
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let item = article(None);
        assert!(SearchSpec::new("STERILE").is_satisfied_by(&item));
        assert!(SearchSpec::new("saline").is_satisfied_by(&item));
        assert!(!SearchSpec::new("bandage").is_satisfied_by(&item));
    }
}
