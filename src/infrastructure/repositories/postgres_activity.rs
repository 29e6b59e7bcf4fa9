// src/infrastructure/repositories/postgres_activity.rs
use super::map_sqlx;
use crate::domain::activity::{
    ActivityFilter, ActivityId, ActivityLogEntry, ActivityLogRepository, NewActivity,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest, SortOrder};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const ACTIVITY_COLUMNS: &str =
    "id, action, user_id, target_type, target_id, description, created_at";

#[derive(Clone)]
pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn apply_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &ActivityFilter) {
        let mut separator = " WHERE ";
        if let Some(user_id) = filter.user_id {
            builder.push(separator);
            builder.push("user_id = ");
            builder.push_bind(Uuid::from(user_id));
            separator = " AND ";
        }
        if let Some(target_type) = filter.target_type {
            builder.push(separator);
            builder.push("target_type = ");
            builder.push_bind(target_type.as_str());
        }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: Uuid,
    action: String,
    user_id: Uuid,
    target_type: String,
    target_id: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for ActivityLogEntry {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(ActivityLogEntry {
            id: ActivityId::new(row.id),
            action: row.action.parse()?,
            user_id: UserId::new(row.user_id),
            target_type: row.target_type.parse()?,
            target_id: row.target_id,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

/// Shared by the repository and the ledger, which appends inside its own
/// transaction.
pub(super) async fn insert_activity<'e, E>(
    executor: E,
    entry: NewActivity,
) -> DomainResult<ActivityLogEntry>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, ActivityRow>(&format!(
        "INSERT INTO activity_log (id, action, user_id, target_type, target_id, description, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {ACTIVITY_COLUMNS}"
    ))
    .bind(Uuid::from(entry.id))
    .bind(entry.action.as_str())
    .bind(Uuid::from(entry.user_id))
    .bind(entry.target_type.as_str())
    .bind(entry.target_id)
    .bind(entry.description)
    .bind(entry.created_at)
    .fetch_one(executor)
    .await
    .map_err(map_sqlx)?;

    ActivityLogEntry::try_from(row)
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append(&self, entry: NewActivity) -> DomainResult<ActivityLogEntry> {
        insert_activity(&self.pool, entry).await
    }

    async fn list_page(
        &self,
        filter: &ActivityFilter,
        order: SortOrder,
        page: PageRequest,
    ) -> DomainResult<Page<ActivityLogEntry>> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(1) FROM activity_log");
        Self::apply_conditions(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ACTIVITY_COLUMNS);
        builder.push(" FROM activity_log");
        Self::apply_conditions(&mut builder, filter);
        builder.push(format!(
            " ORDER BY created_at {dir}, id {dir} LIMIT ",
            dir = order.as_sql()
        ));
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset() as i64);

        let rows = builder
            .build_query_as::<ActivityRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let items = rows
            .into_iter()
            .map(ActivityLogEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total.max(0) as u64, page))
    }
}
