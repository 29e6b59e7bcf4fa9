use crate::domain::stock_request::{RequestStatus, StockRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockRequestDto {
    pub id: Uuid,
    pub article_id: Uuid,
    pub article_name: String,
    pub requester_id: Uuid,
    pub requester_name: String,
    pub quantity: i32,
    pub status: RequestStatus,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub decided_by: Option<Uuid>,
    #[serde(default, with = "serde_time::option")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl StockRequestDto {
    pub fn from_parts(
        request: StockRequest,
        article_name: impl Into<String>,
        requester_name: impl Into<String>,
    ) -> Self {
        Self {
            id: request.id.into(),
            article_id: request.article_id.into(),
            article_name: article_name.into(),
            requester_id: request.requester_id.into(),
            requester_name: requester_name.into(),
            quantity: request.quantity.value(),
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
            decided_by: request.decided_by.map(Into::into),
            decided_at: request.decided_at,
        }
    }
}
