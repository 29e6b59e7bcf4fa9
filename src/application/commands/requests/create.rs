// src/application/commands/requests/create.rs
use super::StockRequestCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, StockRequestDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityAction, NewActivity, TargetType},
        article::{ArticleId, Quantity},
        stock_request::NewStockRequest,
    },
};

pub struct CreateRequestCommand {
    pub article_id: String,
    pub quantity: i32,
}

impl StockRequestCommandService {
    /// Stock is only checked when the request is approved.
    pub async fn create_request(
        &self,
        actor: &AuthenticatedUser,
        command: CreateRequestCommand,
    ) -> ApplicationResult<StockRequestDto> {
        ensure_capability(actor, "requests", "create")?;

        let article_id = ArticleId::parse(&command.article_id)?;
        let quantity = Quantity::new(command.quantity)?;
        let article = self
            .article_repo
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let now = self.clock.now();
        let created = self
            .request_repo
            .insert(NewStockRequest::new(article_id, actor.id, quantity, now))
            .await?;

        self.activity_repo
            .append(NewActivity::new(
                ActivityAction::Create,
                actor.id,
                TargetType::Request,
                created.id,
                format!("requested {} {}", quantity, article.name),
                now,
            ))
            .await?;

        tracing::info!(
            request_id = %created.id,
            article_id = %article_id,
            quantity = quantity.value(),
            "stock request created"
        );

        Ok(StockRequestDto::from_parts(
            created,
            article.name.into_inner(),
            actor.name.clone(),
        ))
    }
}
