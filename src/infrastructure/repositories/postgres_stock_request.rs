// src/infrastructure/repositories/postgres_stock_request.rs
use super::map_sqlx;
use crate::domain::article::{ArticleId, Quantity};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use crate::domain::stock_request::{
    NewStockRequest, StatusCounts, StockRequest, StockRequestFilter, StockRequestId,
    StockRequestRepository,
};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub(super) const REQUEST_COLUMNS: &str =
    "id, article_id, requester_id, quantity, status, created_at, updated_at, decided_by, decided_at";

#[derive(Clone)]
pub struct PostgresStockRequestRepository {
    pool: PgPool,
}

impl PostgresStockRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn apply_conditions<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        filter: &StockRequestFilter,
    ) {
        let mut separator = " WHERE ";
        if let Some(requester) = filter.requester {
            builder.push(separator);
            builder.push("requester_id = ");
            builder.push_bind(Uuid::from(requester));
            separator = " AND ";
        }
        if let Some(status) = filter.status {
            builder.push(separator);
            builder.push("status = ");
            builder.push_bind(status.as_str());
            separator = " AND ";
        }
        if let Some(article_id) = filter.article_id {
            builder.push(separator);
            builder.push("article_id = ");
            builder.push_bind(Uuid::from(article_id));
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct StockRequestRow {
    id: Uuid,
    article_id: Uuid,
    requester_id: Uuid,
    quantity: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    decided_by: Option<Uuid>,
    decided_at: Option<DateTime<Utc>>,
}

impl TryFrom<StockRequestRow> for StockRequest {
    type Error = DomainError;

    fn try_from(row: StockRequestRow) -> Result<Self, Self::Error> {
        Ok(StockRequest {
            id: StockRequestId::new(row.id),
            article_id: ArticleId::new(row.article_id),
            requester_id: UserId::new(row.requester_id),
            quantity: Quantity::new(row.quantity)?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            decided_by: row.decided_by.map(UserId::new),
            decided_at: row.decided_at,
        })
    }
}

#[async_trait]
impl StockRequestRepository for PostgresStockRequestRepository {
    async fn insert(&self, request: NewStockRequest) -> DomainResult<StockRequest> {
        let pending = request.into_pending();
        let row = sqlx::query_as::<_, StockRequestRow>(&format!(
            "INSERT INTO stock_requests (id, article_id, requester_id, quantity, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(Uuid::from(pending.id))
        .bind(Uuid::from(pending.article_id))
        .bind(Uuid::from(pending.requester_id))
        .bind(pending.quantity.value())
        .bind(pending.status.as_str())
        .bind(pending.created_at)
        .bind(pending.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        StockRequest::try_from(row)
    }

    async fn find_by_id(&self, id: StockRequestId) -> DomainResult<Option<StockRequest>> {
        let row = sqlx::query_as::<_, StockRequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM stock_requests WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(StockRequest::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: &StockRequestFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<StockRequest>> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM stock_requests");
        Self::apply_conditions(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(REQUEST_COLUMNS);
        builder.push(" FROM stock_requests");
        Self::apply_conditions(&mut builder, filter);
        builder.push(format!(
            " ORDER BY created_at {dir}, id {dir} LIMIT ",
            dir = order.as_sql()
        ));
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let rows = builder
            .build_query_as::<StockRequestRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let items = rows
            .into_iter()
            .map(StockRequest::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total.max(0) as u64, page))
    }

    async fn count_by_status(&self, requester: Option<UserId>) -> DomainResult<StatusCounts> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(1) FROM stock_requests
             WHERE ($1::uuid IS NULL OR requester_id = $1)
             GROUP BY status",
        )
        .bind(requester.map(Uuid::from))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut counts = StatusCounts::default();
        for (status, count) in rows {
            counts.add(status.parse()?, count.max(0) as u64);
        }
        Ok(counts)
    }
}
