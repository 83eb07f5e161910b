// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;

use crate::config::AppState;

/// Monta o router com todas as rotas. Fica na lib para os testes de
/// integração dirigirem a aplicação inteira em processo.
pub fn app(app_state: AppState) -> Router {
    // Recurso /fields (o esquema global)
    let field_routes = Router::new()
        .route(
            "/fields",
            get(handlers::fields::list_fields)
                .post(handlers::fields::create_field)
                .put(handlers::fields::replace_fields),
        )
        .route("/fields/reset", post(handlers::fields::reset_fields))
        .route(
            "/fields/{id}",
            axum::routing::patch(handlers::fields::update_field)
                .delete(handlers::fields::delete_field),
        );

    // Recurso /users (os registros)
    let user_routes = Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/users/columns", get(handlers::users::list_columns))
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(field_routes)
        .merge(user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}
