use crate::domain::movement::{Movement, MovementKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MovementDto {
    pub id: Uuid,
    pub article_id: Uuid,
    pub article_name: String,
    pub kind: MovementKind,
    pub quantity: i32,
    pub user_id: Uuid,
    pub user_name: String,
    pub reason: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl MovementDto {
    pub fn from_parts(
        movement: Movement,
        article_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            id: movement.id.into(),
            article_id: movement.article_id.into(),
            article_name: article_name.into(),
            kind: movement.kind,
            quantity: movement.quantity.value(),
            user_id: movement.user_id.into(),
            user_name: user_name.into(),
            reason: movement.reason,
            created_at: movement.created_at,
        }
    }
}
