// src/domain/activity/entity.rs
use crate::domain::errors::DomainError;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityId(Uuid);

impl ActivityId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<ActivityId> for Uuid {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Approve,
    Reject,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "create",
            ActivityAction::Update => "update",
            ActivityAction::Delete => "delete",
            ActivityAction::Approve => "approve",
            ActivityAction::Reject => "reject",
        }
    }
}

impl FromStr for ActivityAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(ActivityAction::Create),
            "update" => Ok(ActivityAction::Update),
            "delete" => Ok(ActivityAction::Delete),
            "approve" => Ok(ActivityAction::Approve),
            "reject" => Ok(ActivityAction::Reject),
            other => Err(DomainError::Validation(format!(
                "unknown activity action '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Article,
    Request,
    Movement,
    User,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Article => "article",
            TargetType::Request => "request",
            TargetType::Movement => "movement",
            TargetType::User => "user",
        }
    }
}

impl FromStr for TargetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(TargetType::Article),
            "request" => Ok(TargetType::Request),
            "movement" => Ok(TargetType::Movement),
            "user" => Ok(TargetType::User),
            other => Err(DomainError::Validation(format!(
                "unknown target type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityLogEntry {
    pub id: ActivityId,
    pub action: ActivityAction,
    pub user_id: UserId,
    pub target_type: TargetType,
    pub target_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub id: ActivityId,
    pub action: ActivityAction,
    pub user_id: UserId,
    pub target_type: TargetType,
    pub target_id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl NewActivity {
    pub fn new(
        action: ActivityAction,
        user_id: UserId,
        target_type: TargetType,
        target_id: impl ToString,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::generate(),
            action,
            user_id,
            target_type,
            target_id: target_id.to_string(),
            description: description.into(),
            created_at,
        }
    }

    pub fn into_entry(self) -> ActivityLogEntry {
        ActivityLogEntry {
            id: self.id,
            action: self.action,
            user_id: self.user_id,
            target_type: self.target_type,
            target_id: self.target_id,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
