// src/infrastructure/repositories/postgres_movement.rs
use super::map_sqlx;
use crate::domain::article::{ArticleId, Quantity};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::movement::{
    Movement, MovementFilter, MovementId, MovementRepository, NewMovement,
};
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const MOVEMENT_COLUMNS: &str =
    "id, article_id, kind, quantity, user_id, reason, created_at";

#[derive(Clone)]
pub struct PostgresMovementRepository {
    pool: PgPool,
}

impl PostgresMovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &MovementFilter) {
        let mut separator = " WHERE ";
        if let Some(article_id) = filter.article_id {
            builder.push(separator);
            builder.push("article_id = ");
            builder.push_bind(Uuid::from(article_id));
            separator = " AND ";
        }
        if let Some(kind) = filter.kind {
            builder.push(separator);
            builder.push("kind = ");
            builder.push_bind(kind.as_str());
        }
    }
}

#[derive(Debug, FromRow)]
struct MovementRow {
    id: Uuid,
    article_id: Uuid,
    kind: String,
    quantity: i32,
    user_id: Uuid,
    reason: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MovementRow> for Movement {
    type Error = DomainError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        Ok(Movement {
            id: MovementId::new(row.id),
            article_id: ArticleId::new(row.article_id),
            kind: row.kind.parse()?,
            quantity: Quantity::new(row.quantity)?,
            user_id: UserId::new(row.user_id),
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

/// Ledger lines are only written from inside a ledger transaction.
pub(super) async fn insert_movement<'e, E>(executor: E, movement: NewMovement) -> DomainResult<Movement>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, MovementRow>(&format!(
        "INSERT INTO movements (id, article_id, kind, quantity, user_id, reason, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {MOVEMENT_COLUMNS}"
    ))
    .bind(Uuid::from(movement.id))
    .bind(Uuid::from(movement.article_id))
    .bind(movement.kind.as_str())
    .bind(movement.quantity.value())
    .bind(Uuid::from(movement.user_id))
    .bind(movement.reason)
    .bind(movement.created_at)
    .fetch_one(executor)
    .await
    .map_err(map_sqlx)?;

    Movement::try_from(row)
}

#[async_trait]
impl MovementRepository for PostgresMovementRepository {
    async fn list_page(
        &self,
        filter: &MovementFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<Movement>> {
        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(1) FROM movements");
        Self::apply_conditions(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(MOVEMENT_COLUMNS);
        builder.push(" FROM movements");
        Self::apply_conditions(&mut builder, filter);
        builder.push(format!(
            " ORDER BY created_at {dir}, id {dir} LIMIT ",
            dir = order.as_sql()
        ));
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let rows = builder
            .build_query_as::<MovementRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let items = rows
            .into_iter()
            .map(Movement::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total.max(0) as u64, page))
    }
}
