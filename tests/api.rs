// tests/api.rs
//
// Dirige a aplicação inteira em processo (router + services + backend de
// memória), um request por `oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use dynform_backend::{app, config::AppState, storage::MemoryBackend};

fn test_app() -> Router {
    app(AppState::with_backend(Arc::new(MemoryBackend::new())))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn valid_user() -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "phoneNumber": "+1 555-0000",
        "email": "ann@example.com"
    })
}

async fn seed_defaults(router: &Router) {
    let (status, _) = send(router, "POST", "/fields/reset", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_is_ok() {
    let router = test_app();
    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reset_then_list_returns_the_documented_defaults_in_order() {
    let router = test_app();
    seed_defaults(&router).await;

    let (status, body) = send(&router, "GET", "/fields", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["firstName", "lastName", "phoneNumber", "email"]);

    // Regras de validação canônicas anexadas
    assert_eq!(body[0]["validation"]["minLength"], 2);
    assert_eq!(body[0]["validation"]["maxLength"], 50);
    assert!(body[2]["validation"]["pattern"].is_string());
    assert_eq!(body[3]["type"], "email");
}

#[tokio::test]
async fn duplicate_global_field_name_is_a_conflict() {
    let router = test_app();
    seed_defaults(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/fields",
        Some(json!({ "name": "email", "label": "Backup Email", "type": "email" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn empty_field_name_is_a_bad_request() {
    let router = test_app();

    let (status, body) = send(
        &router,
        "POST",
        "/fields",
        Some(json!({ "name": "", "label": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn field_crud_lifecycle() {
    let router = test_app();

    let (status, created) = send(
        &router,
        "POST",
        "/fields",
        Some(json!({ "name": "dateOfBirth", "label": "Date of Birth", "type": "date" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("field-"));

    // PATCH: atributo enviado sobrescreve, o resto persiste
    let (status, patched) = send(
        &router,
        "PATCH",
        &format!("/fields/{id}"),
        Some(json!({ "required": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["required"], true);
    assert_eq!(patched["label"], "Date of Birth");

    let (status, _) = send(&router, "DELETE", &format!("/fields/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fields) = send(&router, "GET", "/fields", None).await;
    assert!(fields.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn put_replaces_the_whole_field_list() {
    let router = test_app();
    seed_defaults(&router).await;

    let (status, _) = send(
        &router,
        "PUT",
        "/fields",
        Some(json!([
            { "id": "nickname", "name": "nickname", "label": "Nickname", "type": "text", "required": false }
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, fields) = send(&router, "GET", "/fields", None).await;
    assert_eq!(fields.as_array().unwrap().len(), 1);
    assert_eq!(fields[0]["name"], "nickname");
}

#[tokio::test]
async fn create_missing_required_email_fails_and_persists_nothing() {
    let router = test_app();
    seed_defaults(&router).await;

    let (status, body) = send(
        &router,
        "POST",
        "/users",
        Some(json!({ "firstName": "Ann" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["email"], "Email Address is required");
    assert_eq!(body["details"]["lastName"], "Last Name is required");

    let (_, users) = send(&router, "GET", "/users", None).await;
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_then_get_round_trips_with_normalized_custom_fields() {
    let router = test_app();
    seed_defaults(&router).await;

    let (status, created) = send(&router, "POST", "/users", Some(valid_user())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("user-"));
    assert_eq!(created["customFields"], json!([]));

    let (status, fetched) = send(&router, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["firstName"], "Ann");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let router = test_app();

    let (status, _) = send(&router, "GET", "/users/user-ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, "PATCH", "/users/user-ghost", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, "DELETE", "/users/user-ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_merges_values_and_replaces_custom_fields_wholesale() {
    let router = test_app();
    seed_defaults(&router).await;

    let mut user = valid_user();
    user["customFields"] = json!([
        { "id": "custom-1", "name": "petName", "label": "Pet", "type": "text", "required": false }
    ]);
    user["petName"] = json!("Rex");
    let (_, created) = send(&router, "POST", "/users", Some(user)).await;
    let id = created["id"].as_str().unwrap();

    // Merge raso: só firstName muda; customFields enviado substitui a lista
    let (status, updated) = send(
        &router,
        "PATCH",
        &format!("/users/{id}"),
        Some(json!({ "firstName": "Anna", "customFields": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Anna");
    assert_eq!(updated["email"], "ann@example.com");
    assert_eq!(updated["customFields"], json!([]));
}

#[tokio::test]
async fn client_supplied_id_is_ignored_on_create_and_update() {
    let router = test_app();
    seed_defaults(&router).await;

    // O id é sempre gerado pelo servidor; um "id" no corpo não entra no mapa
    let mut user = valid_user();
    user["id"] = json!("user-spoof");
    let (status, created) = send(&router, "POST", "/users", Some(user)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_ne!(id, "user-spoof");
    assert!(id.starts_with("user-"));

    let (status, updated) = send(
        &router,
        "PATCH",
        &format!("/users/{id}"),
        Some(json!({ "id": "user-spoof", "firstName": "Anna" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"].as_str().unwrap(), id);
    assert_eq!(updated["firstName"], "Anna");
}

#[tokio::test]
async fn custom_field_shadowing_a_global_is_a_conflict() {
    let router = test_app();
    seed_defaults(&router).await;

    let mut user = valid_user();
    user["customFields"] = json!([
        { "id": "custom-1", "name": "email", "label": "Other Email", "type": "email", "required": false }
    ]);

    let (status, _) = send(&router, "POST", "/users", Some(user)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_user_removes_it() {
    let router = test_app();
    seed_defaults(&router).await;

    let (_, created) = send(&router, "POST", "/users", Some(valid_user())).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(&router, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn columns_are_globals_plus_deduplicated_custom_fields() {
    let router = test_app();
    seed_defaults(&router).await;

    // Dois usuários com campos locais; "petName" repete entre eles
    let mut first = valid_user();
    first["customFields"] = json!([
        { "id": "custom-1", "name": "petName", "label": "Pet", "type": "text", "required": false }
    ]);
    send(&router, "POST", "/users", Some(first)).await;

    let mut second = valid_user();
    second["email"] = json!("bo@example.com");
    second["customFields"] = json!([
        { "id": "custom-2", "name": "petName", "label": "Animal", "type": "text", "required": false },
        { "id": "custom-3", "name": "favoriteColor", "label": "Color", "type": "text", "required": false }
    ]);
    send(&router, "POST", "/users", Some(second)).await;

    let (status, columns) = send(&router, "GET", "/users/columns", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["firstName", "lastName", "phoneNumber", "email", "petName", "favoriteColor"]
    );
    // Primeiro visto vence
    assert_eq!(columns[4]["label"], "Pet");
}

#[tokio::test]
async fn invalid_email_reports_the_documented_message() {
    let router = test_app();
    seed_defaults(&router).await;

    let mut user = valid_user();
    user["email"] = json!("not-an-email");
    let (status, body) = send(&router, "POST", "/users", Some(user)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["email"], "Invalid email address");
}
