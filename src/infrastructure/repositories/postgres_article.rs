// src/infrastructure/repositories/postgres_article.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleDescription, ArticleFilter, ArticleId, ArticleName, ArticleReadRepository,
    ArticleSort, ArticleUpdate, ArticleWriteRepository, NewArticle, StockLevel,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub(super) const ARTICLE_COLUMNS: &str = "id, name, description, quantity, min_quantity, \
     expiration_date, image, qr_code, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ArticleRow {
    id: Uuid,
    name: String,
    description: String,
    quantity: i32,
    min_quantity: i32,
    expiration_date: Option<NaiveDate>,
    image: Option<String>,
    qr_code: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id),
            name: ArticleName::new(row.name)?,
            description: ArticleDescription::new(row.description)?,
            quantity: StockLevel::new(row.quantity)?,
            min_quantity: StockLevel::new(row.min_quantity)?,
            expiration_date: row.expiration_date,
            image: row.image,
            qr_code: row.qr_code,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            id,
            name,
            description,
            quantity,
            min_quantity,
            expiration_date,
            image,
            qr_code,
            created_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (id, name, description, quantity, min_quantity, expiration_date, image, qr_code, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(Uuid::from(id))
        .bind(name.as_str())
        .bind(description.as_str())
        .bind(quantity.value())
        .bind(min_quantity.value())
        .bind(expiration_date)
        .bind(image)
        .bind(qr_code)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            name,
            description,
            quantity,
            min_quantity,
            expiration_date,
            image,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(name) = name {
            builder.push(", name = ");
            builder.push_bind(name.into_inner());
        }
        if let Some(description) = description {
            builder.push(", description = ");
            builder.push_bind(description.into_inner());
        }
        if let Some(quantity) = quantity {
            builder.push(", quantity = ");
            builder.push_bind(quantity.value());
        }
        if let Some(min_quantity) = min_quantity {
            builder.push(", min_quantity = ");
            builder.push_bind(min_quantity.value());
        }
        if let Some(expiration_date) = expiration_date {
            builder.push(", expiration_date = ");
            builder.push_bind(expiration_date);
        }
        if let Some(image) = image {
            builder.push(", image = ");
            builder.push_bind(image);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(Uuid::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        match maybe_row {
            Some(row) => Article::try_from(row),
            None => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)",
                )
                .bind(Uuid::from(id))
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;
                if exists {
                    Err(DomainError::Conflict(
                        "article was modified concurrently, please retry".into(),
                    ))
                } else {
                    Err(DomainError::NotFound("article not found".into()))
                }
            }
        }
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    fn apply_conditions<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ArticleFilter) {
        let mut has_where = false;

        if let Some(term) = filter.search_term() {
            let pattern = format!("%{}%", escape_like(term));
            builder.push(" WHERE (name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
            has_where = true;
        }

        if filter.low_stock {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("quantity <= min_quantity");
        }
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[ArticleId]) -> DomainResult<Vec<Article>> {
        let ids: Vec<Uuid> = ids.iter().copied().map(Uuid::from).collect();
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn list_page(
        &self,
        filter: &ArticleFilter,
        sort: ArticleSort,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(1) FROM articles");
        Self::apply_conditions(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(" FROM articles");
        Self::apply_conditions(&mut builder, filter);
        // Column and direction come from closed enums, never from user text.
        builder.push(format!(
            " ORDER BY {col} {dir}, id {dir}",
            col = sort.field.column(),
            dir = sort.order.as_sql()
        ));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, total.max(0) as u64, page))
    }

    async fn list_all(&self) -> DomainResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
