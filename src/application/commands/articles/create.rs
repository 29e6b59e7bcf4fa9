// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        activity::{ActivityAction, NewActivity, TargetType},
        article::{
            ArticleDescription, ArticleId, ArticleName, NewArticle, StockLevel, qr_payload,
        },
    },
};
use chrono::NaiveDate;

pub struct CreateArticleCommand {
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub expiration_date: Option<NaiveDate>,
    pub image: Option<String>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    name: Option<String>,
    description: Option<String>,
    quantity: i32,
    min_quantity: i32,
    expiration_date: Option<NaiveDate>,
    image: Option<String>,
}

impl CreateArticleCommandBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn min_quantity(mut self, min_quantity: i32) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    pub fn expiration_date(mut self, expiration_date: NaiveDate) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            name: self.name.ok_or("name is required")?,
            description: self.description.ok_or("description is required")?,
            quantity: self.quantity,
            min_quantity: self.min_quantity,
            expiration_date: self.expiration_date,
            image: self.image,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;

        let name = ArticleName::new(command.name)?;
        let description = ArticleDescription::new(command.description)?;
        let quantity = StockLevel::new(command.quantity)?;
        let min_quantity = StockLevel::new(command.min_quantity)?;
        let now = self.clock.now();

        let id = ArticleId::generate();
        let new_article = NewArticle {
            id,
            qr_code: Some(qr_payload(id, &name)),
            name,
            description,
            quantity,
            min_quantity,
            expiration_date: command.expiration_date,
            image: command.image.filter(|value| !value.trim().is_empty()),
            created_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        self.activity_repo
            .append(NewActivity::new(
                ActivityAction::Create,
                actor.id,
                TargetType::Article,
                created.id,
                format!("created article {}", created.name),
                now,
            ))
            .await?;

        Ok(created.into())
    }
}
