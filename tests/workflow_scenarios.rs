// tests/workflow_scenarios.rs
mod support;

use chrono::NaiveDate;
use stockify::application::{
    ApplicationError,
    commands::{
        articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
        movements::RecordMovementCommand,
        requests::{ApproveRequestCommand, RejectRequestCommand},
        users::{LoginUserCommand, RegisterUserCommand},
    },
    queries::{
        activity::ListActivityQuery,
        articles::{GetArticleByIdQuery, ListArticlesQuery},
        movements::ListMovementsQuery,
        requests::{GetRequestQuery, ListRequestsQuery},
    },
};
use stockify::domain::{
    activity::{ActivityAction, TargetType},
    errors::DomainError,
    movement::MovementKind,
    stock_request::RequestStatus,
    user::Role,
};
use support::{admin_actor, create_article, empty_app, file_request, test_app, user_actor};

async fn article_quantity(app: &support::TestApp, id: uuid::Uuid) -> i32 {
    app.services
        .article_queries
        .get_article_by_id(&admin_actor(), GetArticleByIdQuery { id: id.to_string() })
        .await
        .expect("article")
        .quantity
}

async fn movements_for(app: &support::TestApp, id: uuid::Uuid) -> Vec<stockify::application::dto::MovementDto> {
    app.services
        .movement_queries
        .list_movements(
            &admin_actor(),
            ListMovementsQuery {
                article_id: Some(id.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("movements")
        .items
}

#[tokio::test]
async fn approving_a_request_debits_stock_and_records_one_exit() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 3).await;
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.requester_name, "Jane");

    let approved = app
        .services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .expect("approve");

    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.decided_by, Some(uuid::Uuid::from(*support::ADMIN_ID)));
    assert!(approved.decided_at.is_some());
    assert_eq!(article_quantity(&app, widget.id).await, 7);

    let movements = movements_for(&app, widget.id).await;
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].kind, MovementKind::Exit);
    assert_eq!(movements[0].quantity, 3);
    assert_eq!(movements[0].article_name, "Widget");
    assert_eq!(movements[0].user_name, "Admin");
}

#[tokio::test]
async fn approval_beyond_available_stock_changes_nothing() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 100).await;

    let err = app
        .services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            ApplicationError::Domain(DomainError::InsufficientStock {
                requested: 100,
                available: 10
            })
        ),
        "unexpected error: {err:?}"
    );
    assert_eq!(article_quantity(&app, widget.id).await, 10);
    assert!(movements_for(&app, widget.id).await.is_empty());

    let still_pending = app
        .services
        .request_queries
        .get_request(&admin_actor(), GetRequestQuery { id: request.id.to_string() })
        .await
        .unwrap();
    assert_eq!(still_pending.status, RequestStatus::Pending);
}

#[tokio::test]
async fn a_decided_request_cannot_be_decided_again() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 3).await;
    let id = request.id.to_string();

    app.services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: id.clone() })
        .await
        .unwrap();

    let again = app
        .services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: id.clone() })
        .await
        .unwrap_err();
    assert!(matches!(
        again,
        ApplicationError::Domain(DomainError::InvalidStateTransition { .. })
    ));

    let reject = app
        .services
        .request_commands
        .reject_request(&admin_actor(), RejectRequestCommand { id })
        .await
        .unwrap_err();
    assert!(matches!(
        reject,
        ApplicationError::Domain(DomainError::InvalidStateTransition { .. })
    ));

    assert_eq!(article_quantity(&app, widget.id).await, 7);
    assert_eq!(movements_for(&app, widget.id).await.len(), 1);
}

#[tokio::test]
async fn rejection_leaves_stock_untouched() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 4).await;

    let rejected = app
        .services
        .request_commands
        .reject_request(&admin_actor(), RejectRequestCommand { id: request.id.to_string() })
        .await
        .unwrap();

    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(article_quantity(&app, widget.id).await, 10);
    assert!(movements_for(&app, widget.id).await.is_empty());
}

#[tokio::test]
async fn regular_users_cannot_decide_requests() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 1).await;

    let err = app
        .services
        .request_commands
        .approve_request(&user_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
    assert_eq!(article_quantity(&app, widget.id).await, 10);
}

#[tokio::test]
async fn creating_a_request_validates_quantity_and_article() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;

    let zero = app
        .services
        .request_commands
        .create_request(
            &user_actor(),
            stockify::application::commands::requests::CreateRequestCommand {
                article_id: widget.id.to_string(),
                quantity: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        zero,
        ApplicationError::Domain(DomainError::Validation(_)) | ApplicationError::Validation(_)
    ));

    let missing = app
        .services
        .request_commands
        .create_request(
            &user_actor(),
            stockify::application::commands::requests::CreateRequestCommand {
                article_id: uuid::Uuid::new_v4().to_string(),
                quantity: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        missing,
        ApplicationError::NotFound(_) | ApplicationError::Domain(DomainError::NotFound(_))
    ));

    // Stock is only checked at approval time.
    let oversized = file_request(&app, &user_actor(), &widget, 50).await;
    assert_eq!(oversized.status, RequestStatus::Pending);
}

#[tokio::test]
async fn users_only_see_their_own_requests() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let mine = file_request(&app, &user_actor(), &widget, 1).await;
    let admins = file_request(&app, &admin_actor(), &widget, 2).await;

    let page = app
        .services
        .request_queries
        .list_requests(&user_actor(), ListRequestsQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, mine.id);

    let hidden = app
        .services
        .request_queries
        .get_request(&user_actor(), GetRequestQuery { id: admins.id.to_string() })
        .await
        .unwrap_err();
    assert!(matches!(hidden, ApplicationError::NotFound(_)));

    let everything = app
        .services
        .request_queries
        .list_requests(&admin_actor(), ListRequestsQuery::default())
        .await
        .unwrap();
    assert_eq!(everything.total, 2);
}

#[tokio::test]
async fn deleted_articles_are_labelled_in_history() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 1).await;

    app.services
        .article_commands
        .delete_article(&admin_actor(), DeleteArticleCommand { id: widget.id.to_string() })
        .await
        .unwrap();

    let fetched = app
        .services
        .request_queries
        .get_request(&admin_actor(), GetRequestQuery { id: request.id.to_string() })
        .await
        .unwrap();
    assert_eq!(fetched.article_name, "deleted article");
    assert_eq!(fetched.article_id, widget.id);

    let approve = app
        .services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .unwrap_err();
    assert!(matches!(
        approve,
        ApplicationError::NotFound(_) | ApplicationError::Domain(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn manual_movements_adjust_stock_and_refuse_overdraw() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 5, 1).await;

    let entry = app
        .services
        .movement_commands
        .record_movement(
            &admin_actor(),
            RecordMovementCommand {
                article_id: widget.id.to_string(),
                kind: MovementKind::Entry,
                quantity: 7,
                reason: "restock".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(entry.kind, MovementKind::Entry);
    assert_eq!(article_quantity(&app, widget.id).await, 12);

    let overdraw = app
        .services
        .movement_commands
        .record_movement(
            &admin_actor(),
            RecordMovementCommand {
                article_id: widget.id.to_string(),
                kind: MovementKind::Exit,
                quantity: 13,
                reason: "breakage".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        overdraw,
        ApplicationError::Domain(DomainError::InsufficientStock { .. })
    ));
    assert_eq!(article_quantity(&app, widget.id).await, 12);
    assert_eq!(movements_for(&app, widget.id).await.len(), 1);
}

#[tokio::test]
async fn article_updates_and_listing_filters() {
    let app = test_app().await;
    let bolts = create_article(&app, "Bolts", 100, 10).await;
    create_article(&app, "Gloves", 3, 5).await;

    let updated = app
        .services
        .article_commands
        .update_article(
            &admin_actor(),
            UpdateArticleCommand {
                id: bolts.id.to_string(),
                name: None,
                description: Some("M6 stainless".into()),
                quantity: Some(8),
                min_quantity: None,
                expiration_date: None,
                image: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "M6 stainless");
    assert_eq!(updated.quantity, 8);
    assert!(updated.low_stock);

    let low = app
        .services
        .article_queries
        .list_articles(
            &user_actor(),
            ListArticlesQuery {
                low_stock: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(low.total, 2);

    let search = app
        .services
        .article_queries
        .list_articles(
            &user_actor(),
            ListArticlesQuery {
                search: Some("glov".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(search.total, 1);
    assert_eq!(search.items[0].name, "Gloves");

    let denied = app
        .services
        .article_commands
        .delete_article(&user_actor(), DeleteArticleCommand { id: bolts.id.to_string() })
        .await
        .unwrap_err();
    assert!(matches!(denied, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn dashboard_counts_reflect_inventory() {
    let app = test_app().await;
    create_article(&app, "Widget", 10, 2).await;
    let gloves = create_article(&app, "Gloves", 1, 5).await;
    let milk = CreateArticleCommand::builder()
        .name("Milk")
        .description("Semi-skimmed")
        .quantity(20)
        .min_quantity(2)
        .expiration_date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
        .build()
        .unwrap();
    app.services
        .article_commands
        .create_article(&admin_actor(), milk)
        .await
        .unwrap();
    file_request(&app, &user_actor(), &gloves, 1).await;

    let stats = app.services.dashboard_queries.stats(&user_actor()).await.unwrap();
    assert_eq!(stats.total_articles, 3);
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.articles_low_stock, 1);
    assert_eq!(stats.articles_expiring_soon, 1);

    let alerts = app.services.dashboard_queries.alerts(&admin_actor()).await.unwrap();
    assert_eq!(alerts.len(), 2);

    let charts = app.services.dashboard_queries.charts(&admin_actor()).await.unwrap();
    assert_eq!(charts.requests_by_status.get("pending"), Some(&1));
}

#[tokio::test]
async fn activity_log_records_decisions_with_user_labels() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 2).await;
    app.services
        .request_commands
        .approve_request(&admin_actor(), ApproveRequestCommand { id: request.id.to_string() })
        .await
        .unwrap();

    let history = app
        .services
        .activity_queries
        .list_activity(
            &admin_actor(),
            ListActivityQuery {
                target_type: Some(TargetType::Request),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let approvals: Vec<_> = history
        .items
        .iter()
        .filter(|entry| entry.action == ActivityAction::Approve)
        .collect();
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].user_name, "Admin");
    assert_eq!(approvals[0].target_id, request.id.to_string());

    let own = app
        .services
        .activity_queries
        .list_activity(&user_actor(), ListActivityQuery::default())
        .await
        .unwrap();
    assert!(own.items.iter().all(|entry| entry.user_name == "Jane"));
    assert_eq!(own.total, 1);

    let mut no_history = user_actor();
    no_history.capabilities.retain(|cap| cap.resource != "activity");
    let err = app
        .services
        .activity_queries
        .list_activity(&no_history, ListActivityQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn first_account_becomes_admin_and_emails_are_unique() {
    let app = empty_app();

    let first = app
        .services
        .user_commands
        .register(
            None,
            RegisterUserCommand {
                name: "Ada".into(),
                email: "Ada@Example.com".into(),
                password: "correct horse".into(),
                role: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(first.role, Role::Admin);
    assert_eq!(first.email, "ada@example.com");

    let second = app
        .services
        .user_commands
        .register(
            None,
            RegisterUserCommand {
                name: "Bob".into(),
                email: "bob@example.com".into(),
                password: "battery staple".into(),
                role: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(second.role, Role::User);

    let escalation = app
        .services
        .user_commands
        .register(
            None,
            RegisterUserCommand {
                name: "Eve".into(),
                email: "eve@example.com".into(),
                password: "letmeinplease".into(),
                role: Some(Role::Admin),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(escalation, ApplicationError::Forbidden(_)));

    let duplicate = app
        .services
        .user_commands
        .register(
            None,
            RegisterUserCommand {
                name: "Ada again".into(),
                email: "ada@example.com".into(),
                password: "another password".into(),
                role: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(duplicate, ApplicationError::Conflict(_)));

    let login = app
        .services
        .user_commands
        .login(LoginUserCommand {
            email: "ADA@example.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.id, first.id);
    assert_eq!(login.token.token, format!("token-for-{}", first.id));

    let wrong = app
        .services
        .user_commands
        .login(LoginUserCommand {
            email: "ada@example.com".into(),
            password: "wrong password".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(wrong, ApplicationError::Unauthorized(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_first_registrations_yield_one_admin() {
    let app = empty_app();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let services = std::sync::Arc::clone(&app.services);
            tokio::spawn(async move {
                services
                    .user_commands
                    .register(
                        None,
                        RegisterUserCommand {
                            name: format!("Founder {n}"),
                            email: format!("founder{n}@example.com"),
                            password: "correct horse".into(),
                            role: None,
                        },
                    )
                    .await
            })
        })
        .collect();

    let mut roles = Vec::new();
    for handle in handles {
        roles.push(handle.await.expect("task panicked").expect("registration").role);
    }
    assert_eq!(roles.iter().filter(|role| **role == Role::Admin).count(), 1);
    assert_eq!(roles.iter().filter(|role| **role == Role::User).count(), 7);
}
