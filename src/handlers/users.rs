// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{FieldDefinition, UserDraft, UserPatch},
    services::schema,
};

// =============================================================================
//  GESTÃO DE REGISTROS (User Management)
// =============================================================================

// GET /users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Todos os registros de usuário", body = Vec<Object>)
    )
)]
pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // Fail-open: a tabela sempre renderiza, mesmo com o backend fora
    let users = match app_state.user_service.list().await {
        Ok(users) => users,
        Err(e) if e.is_backend_failure() => {
            tracing::warn!("🔥 Falha ao listar usuários, devolvendo lista vazia: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    Ok((StatusCode::OK, Json(users)))
}

// GET /users/columns
#[utoipa::path(
    get,
    path = "/users/columns",
    tag = "Users",
    responses(
        (status = 200, description = "Colunas da tabela: globais + campos locais de todos os registros, deduplicado por nome", body = Vec<FieldDefinition>)
    )
)]
pub async fn list_columns(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // Mesma política das outras leituras de coleção: só falha de backend
    // degrada para lista vazia
    let global = match app_state.field_service.list().await {
        Ok(fields) => fields,
        Err(e) if e.is_backend_failure() => {
            tracing::warn!("🔥 Falha ao listar campos para as colunas: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    let users = match app_state.user_service.list().await {
        Ok(users) => users,
        Err(e) if e.is_backend_failure() => {
            tracing::warn!("🔥 Falha ao listar usuários para as colunas: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let columns = schema::unique_columns(&global, &users);
    Ok((StatusCode::OK, Json(columns)))
}

// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "O registro", body = Object),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_service
        .get(&id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok((StatusCode::OK, Json(user)))
}

// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 201, description = "Registro criado, com id gerado e customFields normalizado", body = Object),
        (status = 400, description = "Validação falhou; nada persistido"),
        (status = 409, description = "Campo local colide com o esquema global")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// PATCH /users/{id}
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    request_body = Object,
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 200, description = "Registro após o merge", body = Object),
        (status = 400, description = "O resultado do merge não passa na validação"),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.update(&id, patch).await?;
    Ok((StatusCode::OK, Json(user)))
}

// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Id do registro")),
    responses(
        (status = 204, description = "Registro removido, inclusive seus campos locais"),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
