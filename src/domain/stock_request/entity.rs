// src/domain/stock_request/entity.rs
use crate::domain::article::{ArticleId, Quantity};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::stock_request::value_objects::{RequestStatus, StockRequestId};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct StockRequest {
    pub id: StockRequestId,
    pub article_id: ArticleId,
    pub requester_id: UserId,
    pub quantity: Quantity,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub decided_by: Option<UserId>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl StockRequest {
    pub fn approve(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.decide(RequestStatus::Approved, actor, now)
    }

    pub fn reject(&mut self, actor: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.decide(RequestStatus::Rejected, actor, now)
    }

    /// Only pending requests can be decided, and only once.
    fn decide(
        &mut self,
        target: RequestStatus,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.status.as_str(),
                to: target.as_str(),
            });
        }
        self.status = target;
        self.decided_by = Some(actor);
        self.decided_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewStockRequest {
    pub id: StockRequestId,
    pub article_id: ArticleId,
    pub requester_id: UserId,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
}

impl NewStockRequest {
    pub fn new(
        article_id: ArticleId,
        requester_id: UserId,
        quantity: Quantity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: StockRequestId::generate(),
            article_id,
            requester_id,
            quantity,
            created_at,
        }
    }

    pub fn into_pending(self) -> StockRequest {
        StockRequest {
            id: self.id,
            article_id: self.article_id,
            requester_id: self.requester_id,
            quantity: self.quantity,
            status: RequestStatus::Pending,
            created_at: self.created_at,
            updated_at: self.created_at,
            decided_by: None,
            decided_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending() -> StockRequest {
        NewStockRequest::new(
            ArticleId::generate(),
            UserId::generate(),
            Quantity::new(3).unwrap(),
            Utc::now(),
        )
        .into_pending()
    }

    #[test]
    fn approve_records_decision() {
        let mut request = pending();
        let admin = UserId::generate();
        let at = request.created_at + Duration::minutes(1);
        request.approve(admin, at).unwrap();
        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.decided_by, Some(admin));
        assert_eq!(request.decided_at, Some(at));
    }

    #[test]
    fn decided_requests_cannot_transition_again() {
        let mut request = pending();
        let admin = UserId::generate();
        request.reject(admin, Utc::now()).unwrap();

        let err = request.approve(admin, Utc::now()).unwrap_err();
        match err {
            DomainError::InvalidStateTransition { from, to } => {
                assert_eq!(from, "rejected");
                assert_eq!(to, "approved");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(request.status, RequestStatus::Rejected);
    }

    #[test]
    fn approve_twice_is_refused() {
        let mut request = pending();
        let admin = UserId::generate();
        request.approve(admin, Utc::now()).unwrap();
        assert!(matches!(
            request.approve(admin, Utc::now()),
            Err(DomainError::InvalidStateTransition { .. })
        ));
    }
}
