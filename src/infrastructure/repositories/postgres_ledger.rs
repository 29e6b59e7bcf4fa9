// src/infrastructure/repositories/postgres_ledger.rs
//! Each operation runs in one transaction. Row locks are taken request first,
//! then article, so two approvals on the same article queue behind each other.
use super::{
    map_sqlx,
    postgres_activity::insert_activity,
    postgres_article::{ARTICLE_COLUMNS, ArticleRow},
    postgres_movement::insert_movement,
    postgres_stock_request::{REQUEST_COLUMNS, StockRequestRow},
};
use crate::domain::article::{Article, ArticleId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ledger::{
    AdjustmentReceipt, ApprovalReceipt, RequestApproval, RequestRejection, StockAdjustment,
    StockLedger, approval_activity, movement_activity, rejection_activity,
};
use crate::domain::movement::{MovementKind, NewMovement};
use crate::domain::stock_request::{StockRequest, StockRequestId};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresStockLedger {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl PostgresStockLedger {
    pub fn new(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    async fn begin(&self) -> DomainResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        // SET does not accept bind parameters; the value is a plain integer.
        sqlx::query(&format!("SET LOCAL lock_timeout = '{}ms'", self.lock_timeout_ms))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        Ok(tx)
    }
}

async fn lock_request(conn: &mut PgConnection, id: StockRequestId) -> DomainResult<StockRequest> {
    let row = sqlx::query_as::<_, StockRequestRow>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM stock_requests WHERE id = $1 FOR UPDATE"
    ))
    .bind(Uuid::from(id))
    .fetch_optional(conn)
    .await
    .map_err(map_sqlx)?;

    row.map(StockRequest::try_from)
        .transpose()?
        .ok_or_else(|| DomainError::NotFound("request not found".into()))
}

async fn lock_article(conn: &mut PgConnection, id: ArticleId) -> DomainResult<Article> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1 FOR UPDATE"
    ))
    .bind(Uuid::from(id))
    .fetch_optional(conn)
    .await
    .map_err(map_sqlx)?;

    row.map(Article::try_from)
        .transpose()?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))
}

async fn store_stock(conn: &mut PgConnection, article: &Article) -> DomainResult<()> {
    sqlx::query("UPDATE articles SET quantity = $2, updated_at = $3 WHERE id = $1")
        .bind(Uuid::from(article.id))
        .bind(article.quantity.value())
        .bind(article.updated_at)
        .execute(conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

async fn store_decision(conn: &mut PgConnection, request: &StockRequest) -> DomainResult<()> {
    sqlx::query(
        "UPDATE stock_requests
         SET status = $2, updated_at = $3, decided_by = $4, decided_at = $5
         WHERE id = $1",
    )
    .bind(Uuid::from(request.id))
    .bind(request.status.as_str())
    .bind(request.updated_at)
    .bind(request.decided_by.map(Uuid::from))
    .bind(request.decided_at)
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl StockLedger for PostgresStockLedger {
    async fn approve_request(&self, approval: RequestApproval) -> DomainResult<ApprovalReceipt> {
        let RequestApproval {
            request_id,
            actor,
            at,
        } = approval;
        let mut tx = self.begin().await?;

        let mut request = lock_request(&mut tx, request_id).await?;
        request.approve(actor, at)?;

        let mut article = lock_article(&mut tx, request.article_id).await?;
        article.debit(request.quantity, at)?;

        store_stock(&mut tx, &article).await?;
        store_decision(&mut tx, &request).await?;
        let movement = insert_movement(
            &mut *tx,
            NewMovement::for_approval(request.id, article.id, request.quantity, actor, at),
        )
        .await?;
        insert_activity(&mut *tx, approval_activity(&request, actor, at)).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(ApprovalReceipt {
            request,
            article,
            movement,
        })
    }

    async fn reject_request(&self, rejection: RequestRejection) -> DomainResult<StockRequest> {
        let RequestRejection {
            request_id,
            actor,
            at,
        } = rejection;
        let mut tx = self.begin().await?;

        let mut request = lock_request(&mut tx, request_id).await?;
        request.reject(actor, at)?;
        store_decision(&mut tx, &request).await?;
        insert_activity(&mut *tx, rejection_activity(&request, actor, at)).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(request)
    }

    async fn apply_movement(
        &self,
        adjustment: StockAdjustment,
    ) -> DomainResult<AdjustmentReceipt> {
        let StockAdjustment {
            article_id,
            kind,
            quantity,
            actor,
            reason,
            at,
        } = adjustment;
        let mut tx = self.begin().await?;

        let mut article = lock_article(&mut tx, article_id).await?;
        match kind {
            MovementKind::Entry => article.credit(quantity, at)?,
            MovementKind::Exit => article.debit(quantity, at)?,
        }
        store_stock(&mut tx, &article).await?;

        let movement = insert_movement(
            &mut *tx,
            NewMovement::new(article_id, kind, quantity, actor, reason, at),
        )
        .await?;
        insert_activity(&mut *tx, movement_activity(&movement, &article)).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(AdjustmentReceipt { article, movement })
    }
}
