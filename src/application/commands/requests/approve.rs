// src/application/commands/requests/approve.rs
use super::StockRequestCommandService;
use crate::{
    application::{
        commands::{capability::ensure_capability, retry::with_retry},
        dto::{AuthenticatedUser, StockRequestDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        ledger::RequestApproval,
        stock_request::{RequestStatus, StockRequestId},
    },
};

pub struct ApproveRequestCommand {
    pub id: String,
}

impl StockRequestCommandService {
    pub async fn approve_request(
        &self,
        actor: &AuthenticatedUser,
        command: ApproveRequestCommand,
    ) -> ApplicationResult<StockRequestDto> {
        ensure_capability(actor, "requests", "approve")?;

        let request_id = StockRequestId::parse(&command.id)?;
        let mut attempt = 0u32;
        let request = with_retry(&self.retry, "approve_request", || {
            attempt += 1;
            let retrying = attempt > 1;
            let approval = RequestApproval {
                request_id,
                actor: actor.id,
                at: self.clock.now(),
            };
            async move {
                match self.ledger.approve_request(approval).await {
                    Ok(receipt) => {
                        tracing::info!(
                            request_id = %request_id,
                            article_id = %receipt.article.id,
                            quantity = receipt.movement.quantity.value(),
                            remaining = receipt.article.quantity.value(),
                            "stock request approved"
                        );
                        Ok(receipt.request)
                    }
                    Err(err @ DomainError::InvalidStateTransition { .. }) if retrying => {
                        let committed = self
                            .decided_by(request_id, RequestStatus::Approved, actor.id)
                            .await?;
                        if committed.is_some() {
                            tracing::info!(
                                request_id = %request_id,
                                "approval committed by an earlier attempt"
                            );
                        }
                        committed.ok_or_else(|| ApplicationError::from(err))
                    }
                    Err(err) => Err(err.into()),
                }
            }
        })
        .await
        .inspect_err(|err| {
            tracing::info!(request_id = %request_id, error = %err, "approval refused");
        })?;

        let article_name = self.article_name(request.article_id).await?;
        let requester_name = self.requester_name(request.requester_id).await?;
        Ok(StockRequestDto::from_parts(
            request,
            article_name,
            requester_name,
        ))
    }
}
