// src/handlers/fields.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{FieldDefinition, FieldPatch, FieldType, ValidationRules},
};

// =============================================================================
//  CONFIGURAÇÃO DO ESQUEMA GLOBAL (Form Builder)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldPayload {
    // Opcional: sem id o serviço gera um "field-{uuid}"
    #[serde(default)]
    #[schema(example = "field-550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,

    #[validate(length(min = 1, message = "Field name is required"))]
    #[schema(example = "dateOfBirth")]
    pub name: String,

    #[validate(length(min = 1, message = "Field label is required"))]
    #[schema(example = "Date of Birth")]
    pub label: String,

    #[serde(rename = "type", default)]
    #[schema(example = "date")]
    pub field_type: FieldType,

    #[serde(default)]
    #[schema(example = true)]
    pub required: bool,

    #[schema(example = "MM/DD/YYYY")]
    pub placeholder: Option<String>,

    pub validation: Option<ValidationRules>,
}

impl From<CreateFieldPayload> for FieldDefinition {
    fn from(payload: CreateFieldPayload) -> Self {
        FieldDefinition {
            id: payload.id,
            name: payload.name,
            label: payload.label,
            field_type: payload.field_type,
            required: payload.required,
            placeholder: payload.placeholder,
            validation: payload.validation,
        }
    }
}

// GET /fields
#[utoipa::path(
    get,
    path = "/fields",
    tag = "Fields",
    responses(
        (status = 200, description = "Lista ordenada de campos globais", body = Vec<FieldDefinition>)
    )
)]
pub async fn list_fields(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    // Leitura de carga inicial: falha de backend degrada para lista vazia,
    // a tela sempre renderiza
    let fields = match app_state.field_service.list().await {
        Ok(fields) => fields,
        Err(e) if e.is_backend_failure() => {
            tracing::warn!("🔥 Falha ao listar campos, devolvendo lista vazia: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    Ok((StatusCode::OK, Json(fields)))
}

// POST /fields
#[utoipa::path(
    post,
    path = "/fields",
    tag = "Fields",
    request_body = CreateFieldPayload,
    responses(
        (status = 201, description = "Campo criado", body = FieldDefinition),
        (status = 400, description = "Payload inválido"),
        (status = 409, description = "Já existe campo com esse nome")
    )
)]
pub async fn create_field(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateFieldPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let field = app_state.field_service.add(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

// PATCH /fields/{id}
#[utoipa::path(
    patch,
    path = "/fields/{id}",
    tag = "Fields",
    request_body = FieldPatch,
    params(("id" = String, Path, description = "Id da definição de campo")),
    responses(
        (status = 200, description = "Campo atualizado", body = FieldDefinition),
        (status = 404, description = "Campo não encontrado"),
        (status = 409, description = "Renomear colidiria com outro campo")
    )
)]
pub async fn update_field(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<FieldPatch>,
) -> Result<impl IntoResponse, AppError> {
    let field = app_state.field_service.update(&id, patch).await?;
    Ok((StatusCode::OK, Json(field)))
}

// DELETE /fields/{id}
#[utoipa::path(
    delete,
    path = "/fields/{id}",
    tag = "Fields",
    params(("id" = String, Path, description = "Id da definição de campo")),
    responses(
        (status = 204, description = "Campo removido"),
        (status = 404, description = "Campo não encontrado")
    )
)]
pub async fn delete_field(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.field_service.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PUT /fields
#[utoipa::path(
    put,
    path = "/fields",
    tag = "Fields",
    request_body = Vec<FieldDefinition>,
    responses(
        (status = 200, description = "Lista global substituída", body = Vec<FieldDefinition>),
        (status = 409, description = "Nomes repetidos na lista enviada")
    )
)]
pub async fn replace_fields(
    State(app_state): State<AppState>,
    Json(fields): Json<Vec<FieldDefinition>>,
) -> Result<impl IntoResponse, AppError> {
    app_state.field_service.replace_all(fields.clone()).await?;
    Ok((StatusCode::OK, Json(fields)))
}

// POST /fields/reset
#[utoipa::path(
    post,
    path = "/fields/reset",
    tag = "Fields",
    responses(
        (status = 200, description = "Campos restaurados para o padrão", body = Vec<FieldDefinition>)
    )
)]
pub async fn reset_fields(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = app_state.field_service.reset_to_default().await?;
    Ok((StatusCode::OK, Json(defaults)))
}
