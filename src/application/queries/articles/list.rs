use super::ArticleQueryService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{ArticleDto, AuthenticatedUser, PageDto},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleFilter, ArticleSort, ArticleSortField},
        pagination::{PageRequest, SortOrder},
    },
};

#[derive(Debug, Default)]
pub struct ListArticlesQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub low_stock: bool,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        actor: &AuthenticatedUser,
        query: ListArticlesQuery,
    ) -> ApplicationResult<PageDto<ArticleDto>> {
        ensure_capability(actor, "articles", "read")?;

        let sort = ArticleSort {
            field: query
                .sort_by
                .as_deref()
                .map(str::parse::<ArticleSortField>)
                .transpose()?
                .unwrap_or_default(),
            order: query
                .sort_order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
        };
        let filter = ArticleFilter {
            search: query.search,
            low_stock: query.low_stock,
        };
        let page = PageRequest::new(query.page, query.limit);

        let records = self.read_repo.list_page(&filter, sort, page).await?;
        Ok(PageDto::from_page(records, ArticleDto::from))
    }
}
