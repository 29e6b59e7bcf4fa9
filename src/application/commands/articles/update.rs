// src/application/commands/articles/update.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityAction, NewActivity, TargetType},
        article::{ArticleDescription, ArticleId, ArticleName, ArticleUpdate, StockLevel},
    },
};
use chrono::NaiveDate;

/// Fields left as `None` are not touched. `Some(None)` clears an optional
/// field.
#[derive(Default)]
pub struct UpdateArticleCommand {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub min_quantity: Option<i32>,
    pub expiration_date: Option<Option<NaiveDate>>,
    pub image: Option<Option<String>>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "update")?;

        let id = ArticleId::parse(&command.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let mut update = ArticleUpdate::new(id, article.updated_at);
        if let Some(name) = command.name {
            update = update.with_name(ArticleName::new(name)?);
        }
        if let Some(description) = command.description {
            update = update.with_description(ArticleDescription::new(description)?);
        }
        if let Some(quantity) = command.quantity {
            update = update.with_quantity(StockLevel::new(quantity)?);
        }
        if let Some(min_quantity) = command.min_quantity {
            update = update.with_min_quantity(StockLevel::new(min_quantity)?);
        }
        if let Some(expiration_date) = command.expiration_date {
            update = update.with_expiration_date(expiration_date);
        }
        if let Some(image) = command.image {
            update = update.with_image(image.filter(|value| !value.trim().is_empty()));
        }

        if update.is_empty() {
            return Ok(article.into());
        }

        let now = self.clock.now();
        update.set_updated_at(now);
        let updated = self.write_repo.update(update).await?;

        self.activity_repo
            .append(NewActivity::new(
                ActivityAction::Update,
                actor.id,
                TargetType::Article,
                updated.id,
                format!("updated article {}", updated.name),
                now,
            ))
            .await?;

        Ok(updated.into())
    }
}
