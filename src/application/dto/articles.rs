use crate::domain::article::Article;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub min_quantity: i32,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub qr_code: Option<String>,
    pub low_stock: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        let low_stock = article.is_low_stock();
        Self {
            id: article.id.into(),
            name: article.name.into_inner(),
            description: article.description.into_inner(),
            quantity: article.quantity.value(),
            min_quantity: article.min_quantity.value(),
            expiration_date: article.expiration_date,
            image: article.image,
            qr_code: article.qr_code,
            low_stock,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
