use crate::domain::activity::{ActivityAction, ActivityLogEntry, TargetType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    pub id: Uuid,
    pub action: ActivityAction,
    pub user_id: Uuid,
    pub user_name: String,
    pub target_type: TargetType,
    pub target_id: String,
    pub description: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl ActivityDto {
    pub fn from_parts(entry: ActivityLogEntry, user_name: impl Into<String>) -> Self {
        Self {
            id: entry.id.into(),
            action: entry.action,
            user_id: entry.user_id.into(),
            user_name: user_name.into(),
            target_type: entry.target_type,
            target_id: entry.target_id,
            description: entry.description,
            created_at: entry.created_at,
        }
    }
}
