// tests/concurrent_approvals.rs
mod support;

use std::sync::Arc;

use stockify::application::{
    ApplicationError,
    commands::{movements::RecordMovementCommand, requests::ApproveRequestCommand},
    queries::{articles::GetArticleByIdQuery, movements::ListMovementsQuery},
};
use stockify::domain::{errors::DomainError, movement::MovementKind};
use support::{admin_actor, create_article, file_request, test_app, user_actor};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn competing_approvals_never_oversell() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 5, 1).await;
    let first = file_request(&app, &user_actor(), &widget, 4).await;
    let second = file_request(&app, &user_actor(), &widget, 4).await;

    let handles: Vec<_> = [first.id, second.id]
        .into_iter()
        .map(|id| {
            let services = Arc::clone(&app.services);
            tokio::spawn(async move {
                services
                    .request_commands
                    .approve_request(&admin_actor(), ApproveRequestCommand { id: id.to_string() })
                    .await
            })
        })
        .collect();

    let mut approved = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => approved += 1,
            Err(ApplicationError::Domain(DomainError::InsufficientStock { requested, available })) => {
                assert_eq!(requested, 4);
                assert_eq!(available, 1);
                refused += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!((approved, refused), (1, 1));

    let article = app
        .services
        .article_queries
        .get_article_by_id(&admin_actor(), GetArticleByIdQuery { id: widget.id.to_string() })
        .await
        .unwrap();
    assert_eq!(article.quantity, 1);

    let movements = app
        .services
        .movement_queries
        .list_movements(
            &admin_actor(),
            ListMovementsQuery {
                article_id: Some(widget.id.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(movements.total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_exits_keep_the_ledger_consistent() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 20, 0).await;

    let handles: Vec<_> = (0..30)
        .map(|n| {
            let services = Arc::clone(&app.services);
            let article_id = widget.id.to_string();
            tokio::spawn(async move {
                services
                    .movement_commands
                    .record_movement(
                        &admin_actor(),
                        RecordMovementCommand {
                            article_id,
                            kind: MovementKind::Exit,
                            quantity: 1,
                            reason: format!("pick #{n}"),
                        },
                    )
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.expect("task panicked").is_ok() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 20);

    let article = app
        .services
        .article_queries
        .get_article_by_id(&admin_actor(), GetArticleByIdQuery { id: widget.id.to_string() })
        .await
        .unwrap();
    assert_eq!(article.quantity, 0);

    let movements = app
        .services
        .movement_queries
        .list_movements(
            &admin_actor(),
            ListMovementsQuery {
                article_id: Some(widget.id.to_string()),
                limit: 100,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(movements.total, 20);
}
