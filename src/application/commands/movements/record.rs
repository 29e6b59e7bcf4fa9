// src/application/commands/movements/record.rs
use super::MovementCommandService;
use crate::{
    application::{
        commands::{capability::ensure_capability, retry::with_retry},
        dto::{AuthenticatedUser, MovementDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleId, Quantity},
        ledger::StockAdjustment,
        movement::MovementKind,
    },
};

/// Manual stock correction: an entry credits the article, an exit debits it.
pub struct RecordMovementCommand {
    pub article_id: String,
    pub kind: MovementKind,
    pub quantity: i32,
    pub reason: String,
}

impl MovementCommandService {
    pub async fn record_movement(
        &self,
        actor: &AuthenticatedUser,
        command: RecordMovementCommand,
    ) -> ApplicationResult<MovementDto> {
        ensure_capability(actor, "movements", "create")?;

        let article_id = ArticleId::parse(&command.article_id)?;
        let quantity = Quantity::new(command.quantity)?;
        let reason = command.reason.trim().to_string();
        if reason.is_empty() {
            return Err(ApplicationError::validation("reason cannot be empty"));
        }

        let receipt = with_retry(&self.retry, "apply_movement", || {
            let adjustment = StockAdjustment {
                article_id,
                kind: command.kind,
                quantity,
                actor: actor.id,
                reason: reason.clone(),
                at: self.clock.now(),
            };
            async move { Ok(self.ledger.apply_movement(adjustment).await?) }
        })
        .await?;

        tracing::info!(
            article_id = %article_id,
            kind = %command.kind,
            quantity = quantity.value(),
            remaining = receipt.article.quantity.value(),
            "manual movement recorded"
        );

        Ok(MovementDto::from_parts(
            receipt.movement,
            receipt.article.name.into_inner(),
            actor.name.clone(),
        ))
    }
}
