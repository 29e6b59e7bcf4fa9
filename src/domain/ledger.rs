// src/domain/ledger.rs
//! Atomic stock mutations. Every operation here commits its inventory change,
//! its ledger line and its activity entry together, or not at all.
use crate::domain::activity::{ActivityAction, NewActivity, TargetType};
use crate::domain::article::{Article, ArticleId, Quantity};
use crate::domain::errors::DomainResult;
use crate::domain::movement::{Movement, MovementKind};
use crate::domain::stock_request::{StockRequest, StockRequestId};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct RequestApproval {
    pub request_id: StockRequestId,
    pub actor: UserId,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RequestRejection {
    pub request_id: StockRequestId,
    pub actor: UserId,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StockAdjustment {
    pub article_id: ArticleId,
    pub kind: MovementKind,
    pub quantity: Quantity,
    pub actor: UserId,
    pub reason: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ApprovalReceipt {
    pub request: StockRequest,
    pub article: Article,
    pub movement: Movement,
}

#[derive(Debug, Clone)]
pub struct AdjustmentReceipt {
    pub article: Article,
    pub movement: Movement,
}

/// Serialized per article. Implementations must not leave partial writes
/// behind when any step fails.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Pending → approved, debit the article and write the exit line.
    async fn approve_request(&self, approval: RequestApproval) -> DomainResult<ApprovalReceipt>;

    /// Pending → rejected. No inventory effect.
    async fn reject_request(&self, rejection: RequestRejection) -> DomainResult<StockRequest>;

    async fn apply_movement(&self, adjustment: StockAdjustment)
    -> DomainResult<AdjustmentReceipt>;
}

/// Activity entry recorded alongside an approval.
pub fn approval_activity(request: &StockRequest, actor: UserId, at: DateTime<Utc>) -> NewActivity {
    NewActivity::new(
        ActivityAction::Approve,
        actor,
        TargetType::Request,
        request.id,
        format!("approved request #{}", request.id),
        at,
    )
}

pub fn rejection_activity(
    request: &StockRequest,
    actor: UserId,
    at: DateTime<Utc>,
) -> NewActivity {
    NewActivity::new(
        ActivityAction::Reject,
        actor,
        TargetType::Request,
        request.id,
        format!("rejected request #{}", request.id),
        at,
    )
}

pub fn movement_activity(movement: &Movement, article: &Article) -> NewActivity {
    NewActivity::new(
        ActivityAction::Create,
        movement.user_id,
        TargetType::Movement,
        movement.id,
        format!(
            "{} movement of {} {}",
            movement.kind, movement.quantity, article.name
        ),
        movement.created_at,
    )
}
