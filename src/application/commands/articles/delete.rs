// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        activity::{ActivityAction, NewActivity, TargetType},
        article::ArticleId,
    },
};

pub struct DeleteArticleCommand {
    pub id: String,
}

impl ArticleCommandService {
    /// Requests and movements that point at the article keep their stale id.
    pub async fn delete_article(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "articles", "delete")?;

        let id = ArticleId::parse(&command.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        self.write_repo.delete(id).await?;
        self.activity_repo
            .append(NewActivity::new(
                ActivityAction::Delete,
                actor.id,
                TargetType::Article,
                id,
                format!("deleted article {}", article.name),
                self.clock.now(),
            ))
            .await?;
        Ok(())
    }
}
