use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use async_trait::async_trait;
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    /// Case-insensitive match against name and description.
    pub search: Option<String>,
    pub low_stock: bool,
}

impl ArticleFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSortField {
    Name,
    Quantity,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ArticleSortField {
    pub fn column(&self) -> &'static str {
        match self {
            ArticleSortField::Name => "name",
            ArticleSortField::Quantity => "quantity",
            ArticleSortField::CreatedAt => "created_at",
            ArticleSortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for ArticleSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ArticleSortField::Name),
            "quantity" | "quantite" => Ok(ArticleSortField::Quantity),
            "created_at" => Ok(ArticleSortField::CreatedAt),
            "updated_at" => Ok(ArticleSortField::UpdatedAt),
            other => Err(DomainError::Validation(format!(
                "cannot sort articles by '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleSort {
    pub field: ArticleSortField,
    pub order: SortOrder,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Fails with `Conflict` when the stored `updated_at` no longer matches
    /// `update.original_updated_at`.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_ids(&self, ids: &[ArticleId]) -> DomainResult<Vec<Article>>;
    async fn list_page(
        &self,
        filter: &ArticleFilter,
        sort: ArticleSort,
        page: PageRequest,
    ) -> DomainResult<Page<Article>>;
    async fn list_all(&self) -> DomainResult<Vec<Article>>;
}
