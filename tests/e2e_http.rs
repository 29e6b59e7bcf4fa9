// tests/e2e_http.rs
mod support;

use axum::http::StatusCode;
use serde_json::{Value, json};
use support::{
    ADMIN_TOKEN, USER_TOKEN, assert_error_response, bearer_request, create_article, empty_app,
    file_request, read_json, test_app, user_actor,
};
use tower::ServiceExt;

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let resp = app
        .router()
        .oneshot(bearer_request("GET", "/health", None, None))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app().await;
    let resp = app
        .router()
        .oneshot(bearer_request("GET", "/openapi.json", None, None))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/demandes/{id}/approve"].is_object());
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = test_app().await;

    let missing = app
        .router()
        .oneshot(bearer_request("GET", "/api/articles", None, None))
        .await
        .unwrap();
    assert_error_response(missing, StatusCode::UNAUTHORIZED, "Unauthorized").await;

    let forged = app
        .router()
        .oneshot(bearer_request("GET", "/api/articles", Some("forged"), None))
        .await
        .unwrap();
    assert_error_response(forged, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn regular_users_cannot_approve() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 2).await;

    let resp = app
        .router()
        .oneshot(bearer_request(
            "PUT",
            &format!("/api/demandes/{}/approve", request.id),
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn article_listing_is_paginated() {
    let app = test_app().await;
    for name in ["Anchor", "Bolt", "Chain"] {
        create_article(&app, name, 10, 1).await;
    }

    let resp = app
        .router()
        .oneshot(bearer_request(
            "GET",
            "/api/articles?page=2&limit=2&sort_by=name&sort_order=asc",
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["pages"], 2);
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Chain");
    assert_eq!(items[0]["low_stock"], false);
}

#[tokio::test]
async fn request_lifecycle_over_http() {
    let app = test_app().await;
    let router = app.router();

    let created = router
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(json!({
                "name": "Widget",
                "description": "Blue widget",
                "quantity": 10,
                "min_quantity": 2
            })),
        ))
        .await
        .unwrap();
    let (status, article) = read_json(created).await;
    assert_eq!(status, StatusCode::CREATED);
    let article_id = article["id"].as_str().unwrap().to_string();
    assert!(article["qr_code"].as_str().is_some_and(|qr| qr.contains(&article_id)));

    let filed = router
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/demandes",
            Some(USER_TOKEN),
            Some(json!({ "article_id": article_id, "quantity": 3 })),
        ))
        .await
        .unwrap();
    let (status, request) = read_json(filed).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["status"], "pending");
    assert_eq!(request["requester_name"], "Jane");
    let request_id = request["id"].as_str().unwrap().to_string();

    let approved = router
        .clone()
        .oneshot(bearer_request(
            "PUT",
            &format!("/api/demandes/{request_id}/approve"),
            Some(ADMIN_TOKEN),
            None,
        ))
        .await
        .unwrap();
    let (status, request) = read_json(approved).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request["status"], "approved");

    let again = router
        .clone()
        .oneshot(bearer_request(
            "PUT",
            &format!("/api/demandes/{request_id}/approve"),
            Some(ADMIN_TOKEN),
            None,
        ))
        .await
        .unwrap();
    assert_error_response(again, StatusCode::CONFLICT, "Conflict").await;

    let fetched = router
        .clone()
        .oneshot(bearer_request(
            "GET",
            &format!("/api/articles/{article_id}"),
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();
    let (_, article) = read_json(fetched).await;
    assert_eq!(article["quantity"], 7);

    let ledger = router
        .clone()
        .oneshot(bearer_request(
            "GET",
            &format!("/api/mouvements?article_id={article_id}"),
            Some(ADMIN_TOKEN),
            None,
        ))
        .await
        .unwrap();
    let (status, ledger) = read_json(ledger).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ledger["total"], 1);
    assert_eq!(ledger["items"][0]["kind"], "exit");
    assert_eq!(ledger["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn oversized_approval_is_a_conflict() {
    let app = test_app().await;
    let widget = create_article(&app, "Widget", 10, 2).await;
    let request = file_request(&app, &user_actor(), &widget, 100).await;

    let resp = app
        .router()
        .oneshot(bearer_request(
            "PUT",
            &format!("/api/demandes/{}/approve", request.id),
            Some(ADMIN_TOKEN),
            None,
        ))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

#[tokio::test]
async fn malformed_ids_and_payloads_are_rejected() {
    let app = test_app().await;

    let bad_id = app
        .router()
        .oneshot(bearer_request("GET", "/api/articles/not-a-uuid", Some(USER_TOKEN), None))
        .await
        .unwrap();
    assert_error_response(bad_id, StatusCode::BAD_REQUEST, "Bad Request").await;

    let missing = app
        .router()
        .oneshot(bearer_request(
            "GET",
            &format!("/api/articles/{}", uuid::Uuid::new_v4()),
            Some(USER_TOKEN),
            None,
        ))
        .await
        .unwrap();
    assert_error_response(missing, StatusCode::NOT_FOUND, "Not Found").await;

    let negative = app
        .router()
        .oneshot(bearer_request(
            "POST",
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(json!({ "name": "Widget", "description": "x", "quantity": -1, "min_quantity": 0 })),
        ))
        .await
        .unwrap();
    assert_error_response(negative, StatusCode::BAD_REQUEST, "Bad Request").await;

    let no_quantity = app
        .router()
        .oneshot(bearer_request(
            "POST",
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(json!({ "name": "NoQty", "description": "x" })),
        ))
        .await
        .unwrap();
    assert_error_response(no_quantity, StatusCode::BAD_REQUEST, "Bad Request").await;

    let textual_quantity = app
        .router()
        .oneshot(bearer_request(
            "POST",
            "/api/articles",
            Some(ADMIN_TOKEN),
            Some(json!({
                "name": "Widget",
                "description": "x",
                "quantity": "ten",
                "min_quantity": 1
            })),
        ))
        .await
        .unwrap();
    assert_error_response(textual_quantity, StatusCode::BAD_REQUEST, "Bad Request").await;

    let bad_request_body = app
        .router()
        .oneshot(bearer_request(
            "POST",
            "/api/demandes",
            Some(USER_TOKEN),
            Some(json!({ "article_id": uuid::Uuid::new_v4().to_string() })),
        ))
        .await
        .unwrap();
    assert_error_response(bad_request_body, StatusCode::BAD_REQUEST, "Bad Request").await;

    let listing = app
        .router()
        .oneshot(bearer_request("GET", "/api/articles", Some(ADMIN_TOKEN), None))
        .await
        .unwrap();
    let (_, body) = read_json(listing).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn reading_history_does_not_append_to_it() {
    let app = test_app().await;
    create_article(&app, "Widget", 10, 2).await;

    let mut snapshots: Vec<Value> = Vec::new();
    for _ in 0..2 {
        let resp = app
            .router()
            .oneshot(bearer_request("GET", "/api/historique", Some(ADMIN_TOKEN), None))
            .await
            .unwrap();
        let (status, body) = read_json(resp).await;
        assert_eq!(status, StatusCode::OK);
        snapshots.push(body);
    }
    assert_eq!(snapshots[0], snapshots[1]);
    assert_eq!(snapshots[0]["total"], 1);
    assert_eq!(snapshots[0]["items"][0]["action"], "create");
    assert_eq!(snapshots[0]["items"][0]["user_name"], "Admin");
}

#[tokio::test]
async fn register_login_and_profile() {
    let app = empty_app();
    let router = app.router();

    let registered = router
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "correct horse"
            })),
        ))
        .await
        .unwrap();
    let (status, user) = read_json(registered).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["role"], "admin");
    assert!(user.get("password_hash").is_none());

    let duplicate = router
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "correct horse"
            })),
        ))
        .await
        .unwrap();
    assert_error_response(duplicate, StatusCode::CONFLICT, "Conflict").await;

    let login = router
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "correct horse" })),
        ))
        .await
        .unwrap();
    let (status, body) = read_json(login).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["token"]["token"].as_str().is_some_and(|t| t.starts_with("token-for-")));

    let bad_login = router
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "nope nope nope" })),
        ))
        .await
        .unwrap();
    assert_error_response(bad_login, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn profile_lists_capabilities() {
    let app = test_app().await;
    let resp = app
        .router()
        .oneshot(bearer_request("GET", "/api/auth/me", Some(USER_TOKEN), None))
        .await
        .unwrap();
    let (status, body) = read_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Jane");
    assert_eq!(body["user"]["role"], "user");
    let capabilities = body["capabilities"].as_array().expect("capabilities");
    assert!(
        capabilities
            .iter()
            .any(|c| c["resource"] == "requests" && c["action"] == "create")
    );
    assert!(
        !capabilities
            .iter()
            .any(|c| c["resource"] == "requests" && c["action"] == "approve")
    );
}
