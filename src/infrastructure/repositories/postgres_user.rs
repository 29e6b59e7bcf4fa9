// src/infrastructure/repositories/postgres_user.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    DisplayName, Email, NewUser, PasswordHash, Role, User, UserId, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";

/// Advisory lock serializing first-account registrations.
const FIRST_ADMIN_LOCK_KEY: i64 = 0x5354_4b46_5953_0001;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id),
            name: DisplayName::new(row.name)?,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            role: row.role.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

async fn insert_user<'e, E>(executor: E, new_user: NewUser) -> DomainResult<User>
where
    E: Executor<'e, Database = Postgres>,
{
    let NewUser {
        id,
        name,
        email,
        password_hash,
        role,
        created_at,
    } = new_user;

    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::from(id))
    .bind(name.as_str())
    .bind(email.as_str())
    .bind(password_hash.as_str())
    .bind(role.as_str())
    .bind(created_at)
    .fetch_one(executor)
    .await
    .map_err(map_sqlx)?;

    User::try_from(row)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_sqlx)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        insert_user(&self.pool, new_user).await
    }

    async fn insert_first_admin(&self, new_user: NewUser) -> DomainResult<Option<User>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(FIRST_ADMIN_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if existing > 0 {
            return Ok(None);
        }

        let user = insert_user(
            &mut *tx,
            NewUser {
                role: Role::Admin,
                ..new_user
            },
        )
        .await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(Some(user))
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let ids: Vec<Uuid> = ids.iter().copied().map(Uuid::from).collect();
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }
}
