use super::StockRequestQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PageDto, StockRequestDto},
        error::ApplicationResult,
    },
    domain::{
        article::ArticleId,
        pagination::{Page, PageRequest, SortOrder},
        stock_request::{RequestStatus, StockRequestFilter},
    },
};

#[derive(Debug, Default)]
pub struct ListRequestsQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<RequestStatus>,
    pub article_id: Option<String>,
    pub sort_order: Option<String>,
}

impl StockRequestQueryService {
    pub async fn list_requests(
        &self,
        actor: &AuthenticatedUser,
        query: ListRequestsQuery,
    ) -> ApplicationResult<PageDto<StockRequestDto>> {
        let requester = Self::visibility_scope(actor)?;

        let filter = StockRequestFilter {
            requester,
            status: query.status,
            article_id: query
                .article_id
                .as_deref()
                .map(ArticleId::parse)
                .transpose()?,
        };
        let order = query
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();
        let page = PageRequest::new(query.page, query.limit);

        let Page {
            items,
            total,
            request,
        } = self.request_repo.list_page(&filter, order, page).await?;
        let items = self.labelled(items).await?;
        Ok(Page::new(items, total, request).into())
    }
}
