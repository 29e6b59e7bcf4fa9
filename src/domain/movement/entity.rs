// src/domain/movement/entity.rs
use crate::domain::article::{ArticleId, Quantity};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::stock_request::StockRequestId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovementId(Uuid);

impl MovementId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<MovementId> for Uuid {
    fn from(value: MovementId) -> Self {
        value.0
    }
}

impl fmt::Display for MovementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Entry,
    Exit,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "entry",
            MovementKind::Exit => "exit",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(MovementKind::Entry),
            "exit" => Ok(MovementKind::Exit),
            other => Err(DomainError::Validation(format!(
                "unknown movement type '{other}'"
            ))),
        }
    }
}

/// Immutable ledger line. Never updated or deleted once written.
#[derive(Debug, Clone)]
pub struct Movement {
    pub id: MovementId,
    pub article_id: ArticleId,
    pub kind: MovementKind,
    pub quantity: Quantity,
    pub user_id: UserId,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMovement {
    pub id: MovementId,
    pub article_id: ArticleId,
    pub kind: MovementKind,
    pub quantity: Quantity,
    pub user_id: UserId,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl NewMovement {
    pub fn new(
        article_id: ArticleId,
        kind: MovementKind,
        quantity: Quantity,
        user_id: UserId,
        reason: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MovementId::generate(),
            article_id,
            kind,
            quantity,
            user_id,
            reason: reason.into(),
            created_at,
        }
    }

    /// Exit line written when a request is approved.
    pub fn for_approval(
        request_id: StockRequestId,
        article_id: ArticleId,
        quantity: Quantity,
        approver: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            article_id,
            MovementKind::Exit,
            quantity,
            approver,
            format!("request approval #{request_id}"),
            created_at,
        )
    }

    pub fn into_movement(self) -> Movement {
        Movement {
            id: self.id,
            article_id: self.article_id,
            kind: self.kind,
            quantity: self.quantity,
            user_id: self.user_id,
            reason: self.reason,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_movement_is_an_exit_referencing_the_request() {
        let request_id = StockRequestId::generate();
        let movement = NewMovement::for_approval(
            request_id,
            ArticleId::generate(),
            Quantity::new(3).unwrap(),
            UserId::generate(),
            Utc::now(),
        );
        assert_eq!(movement.kind, MovementKind::Exit);
        assert_eq!(movement.reason, format!("request approval #{request_id}"));
    }

    #[test]
    fn kind_parses_wire_names() {
        assert_eq!("entry".parse::<MovementKind>().unwrap(), MovementKind::Entry);
        assert_eq!("exit".parse::<MovementKind>().unwrap(), MovementKind::Exit);
        assert!("sortie".parse::<MovementKind>().is_err());
    }
}
