// tests/retried_decisions.rs
mod support;

use std::future::Future;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use stockify::application::{
    ApplicationError,
    commands::requests::{ApproveRequestCommand, RejectRequestCommand},
    dto::ArticleDto,
};
use stockify::domain::{
    article::{ArticleId, ArticleReadRepository},
    errors::{DomainError, DomainResult},
    ledger::{
        AdjustmentReceipt, ApprovalReceipt, RequestApproval, RequestRejection, StockAdjustment,
        StockLedger,
    },
    stock_request::{RequestStatus, StockRequest, StockRequestId},
    user::UserId,
};
use stockify::infrastructure::memory::InMemoryStore;
use support::{TestApp, admin_actor, create_article, file_request, test_app_with, user_actor};

/// Fails the first decision with a storage conflict, either after letting the
/// store commit it (an attempt timing out late) or before touching the store.
struct FlakyLedger {
    store: Arc<InMemoryStore>,
    commit_first: bool,
    tripped: AtomicBool,
}

impl FlakyLedger {
    fn new(store: Arc<InMemoryStore>, commit_first: bool) -> Self {
        Self {
            store,
            commit_first,
            tripped: AtomicBool::new(false),
        }
    }

    async fn run<T>(&self, decide: impl Future<Output = DomainResult<T>>) -> DomainResult<T> {
        if self.tripped.swap(true, Ordering::SeqCst) {
            return decide.await;
        }
        if self.commit_first {
            decide.await?;
        }
        Err(DomainError::StorageConflict("attempt timed out".into()))
    }
}

#[async_trait]
impl StockLedger for FlakyLedger {
    async fn approve_request(&self, approval: RequestApproval) -> DomainResult<ApprovalReceipt> {
        self.run(self.store.approve_request(approval)).await
    }

    async fn reject_request(&self, rejection: RequestRejection) -> DomainResult<StockRequest> {
        self.run(self.store.reject_request(rejection)).await
    }

    async fn apply_movement(
        &self,
        adjustment: StockAdjustment,
    ) -> DomainResult<AdjustmentReceipt> {
        self.store.apply_movement(adjustment).await
    }
}

async fn flaky_app(commit_first: bool) -> TestApp {
    test_app_with(|store, repositories| {
        repositories.ledger = Arc::new(FlakyLedger::new(Arc::clone(store), commit_first));
    })
    .await
}

async fn stock_of(app: &TestApp, article: &ArticleDto) -> i32 {
    ArticleReadRepository::find_by_id(app.store.as_ref(), ArticleId::new(article.id))
        .await
        .unwrap()
        .unwrap()
        .quantity
        .value()
}

#[tokio::test]
async fn approval_committed_by_a_timed_out_attempt_is_reported_once() {
    let app = flaky_app(true).await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 3).await;

    let approved = app
        .services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .expect("retry reports the committed approval");

    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(stock_of(&app, &widget).await, 7);
}

#[tokio::test]
async fn rejection_committed_by_a_timed_out_attempt_is_reported_once() {
    let app = flaky_app(true).await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 3).await;

    let rejected = app
        .services
        .request_commands
        .reject_request(&admin_actor(), RejectRequestCommand { id: request.id.to_string() })
        .await
        .expect("retry reports the committed rejection");

    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(stock_of(&app, &widget).await, 10);
}

#[tokio::test]
async fn retry_still_conflicts_when_someone_else_decided() {
    let app = flaky_app(false).await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 3).await;

    app.store
        .approve_request(RequestApproval {
            request_id: StockRequestId::new(request.id),
            actor: UserId::generate(),
            at: Utc::now(),
        })
        .await
        .unwrap();

    let err = app
        .services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidStateTransition { .. })
    ));
    assert_eq!(stock_of(&app, &widget).await, 7);
}
