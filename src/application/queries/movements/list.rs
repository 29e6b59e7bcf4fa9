use super::MovementQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, MovementDto, PageDto},
        error::ApplicationResult,
        queries::labels::LabelIndex,
    },
    domain::{
        article::ArticleId,
        movement::{MovementFilter, MovementKind},
        pagination::{PageRequest, SortOrder},
    },
};

#[derive(Debug, Default)]
pub struct ListMovementsQuery {
    pub page: u32,
    pub limit: u32,
    pub article_id: Option<String>,
    pub kind: Option<MovementKind>,
    pub sort_order: Option<String>,
}

impl MovementQueryService {
    pub async fn list_movements(
        &self,
        actor: &AuthenticatedUser,
        query: ListMovementsQuery,
    ) -> ApplicationResult<PageDto<MovementDto>> {
        ensure_capability(actor, "movements", "read")?;

        let filter = MovementFilter {
            article_id: query
                .article_id
                .as_deref()
                .map(ArticleId::parse)
                .transpose()?,
            kind: query.kind,
        };
        let order = query
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let records = self
            .movement_repo
            .list_page(&filter, order, PageRequest::new(query.page, query.limit))
            .await?;
        let labels = LabelIndex::load(
            self.article_repo.as_ref(),
            self.user_repo.as_ref(),
            records.items.iter().map(|m| m.article_id),
            records.items.iter().map(|m| m.user_id),
        )
        .await?;

        Ok(PageDto::from_page(records, |movement| {
            let article_name = labels.article_name(movement.article_id);
            let user_name = labels.user_name(movement.user_id);
            MovementDto::from_parts(movement, article_name, user_name)
        }))
    }
}
