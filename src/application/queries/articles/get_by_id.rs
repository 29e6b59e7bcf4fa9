use super::ArticleQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: String,
}

impl ArticleQueryService {
    pub async fn get_article_by_id(
        &self,
        actor: &AuthenticatedUser,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "read")?;

        let id = ArticleId::parse(&query.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        Ok(article.into())
    }
}
