// src/application/commands/requests/reject.rs
use super::StockRequestCommandService;
use crate::{
    application::{
        commands::{capability::ensure_capability, retry::with_retry},
        dto::{AuthenticatedUser, StockRequestDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        ledger::RequestRejection,
        stock_request::{RequestStatus, StockRequestId},
    },
};

pub struct RejectRequestCommand {
    pub id: String,
}

impl StockRequestCommandService {
    pub async fn reject_request(
        &self,
        actor: &AuthenticatedUser,
        command: RejectRequestCommand,
    ) -> ApplicationResult<StockRequestDto> {
        ensure_capability(actor, "requests", "reject")?;

        let request_id = StockRequestId::parse(&command.id)?;
        let mut attempt = 0u32;
        let request = with_retry(&self.retry, "reject_request", || {
            attempt += 1;
            let retrying = attempt > 1;
            let rejection = RequestRejection {
                request_id,
                actor: actor.id,
                at: self.clock.now(),
            };
            async move {
                match self.ledger.reject_request(rejection).await {
                    Ok(request) => Ok(request),
                    Err(err @ DomainError::InvalidStateTransition { .. }) if retrying => self
                        .decided_by(request_id, RequestStatus::Rejected, actor.id)
                        .await?
                        .ok_or_else(|| ApplicationError::from(err)),
                    Err(err) => Err(err.into()),
                }
            }
        })
        .await?;

        tracing::info!(request_id = %request_id, "stock request rejected");

        let article_name = self.article_name(request.article_id).await?;
        let requester_name = self.requester_name(request.requester_id).await?;
        Ok(StockRequestDto::from_parts(
            request,
            article_name,
            requester_name,
        ))
    }
}
