// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nenhuma variante é fatal: toda falha devolve o controle ao chamador.
#[derive(Debug, Error)]
pub enum AppError {
    // Erros do motor de validação dinâmica: chave do campo -> mensagem
    #[error("One or more fields are invalid")]
    ValidationError(HashMap<String, String>),

    // Erros de formato do payload (derive do `validator`)
    #[error("Invalid request payload")]
    PayloadError(#[from] validator::ValidationErrors),

    #[error("A field named '{0}' already exists")]
    DuplicateFieldName(String),

    #[error("A field with id '{0}' already exists")]
    DuplicateFieldId(String),

    #[error("Field not found")]
    FieldNotFound,

    #[error("User not found")]
    UserNotFound,

    // --- Falhas de backend (persistência) ---
    #[error("Upstream API failure: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Unexpected internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Leituras de carga inicial degradam para lista vazia quando a falha é
    /// do backend (fail-open para leituras, fail-closed para escritas).
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            AppError::Upstream(_)
                | AppError::Io(_)
                | AppError::Serialization(_)
                | AppError::Internal(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Erros de validação carregam o mapa campo -> mensagem.
            AppError::ValidationError(details) => {
                let body = Json(json!({
                    "error": "One or more fields are invalid",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::PayloadError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Invalid request payload",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::DuplicateFieldName(ref name) => {
                let body = Json(json!({
                    "error": format!("A field named '{}' already exists", name)
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::DuplicateFieldId(ref id) => {
                let body = Json(json!({
                    "error": format!("A field with id '{}' already exists", id)
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::FieldNotFound => (StatusCode::NOT_FOUND, "Field not found"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),

            AppError::Upstream(ref e) => {
                tracing::error!("🔥 Falha no backend remoto: {}", e);
                (StatusCode::BAD_GATEWAY, "The storage backend is unavailable")
            }

            // Todos os outros (Io, Serialization, Internal) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("🔥 Erro interno: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
