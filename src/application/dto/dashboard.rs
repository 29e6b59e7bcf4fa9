use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DashboardStatsDto {
    pub total_articles: u64,
    pub total_users: u64,
    pub total_requests: u64,
    pub articles_low_stock: u64,
    pub articles_expiring_soon: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    StockLow,
    ExpiringSoon,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlertDto {
    pub article_id: Uuid,
    pub name: String,
    pub kind: AlertKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StockLevelPoint {
    pub name: String,
    pub quantity: i32,
    pub min_quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartsDto {
    pub articles_by_category: BTreeMap<String, u64>,
    pub requests_by_status: BTreeMap<String, u64>,
    pub stock_levels: Vec<StockLevelPoint>,
}
