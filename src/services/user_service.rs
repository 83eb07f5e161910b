// src/services/user_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{FieldDefinition, UserDraft, UserPatch, UserRecord},
    services::{schema, validation},
    storage::StorageBackend,
};

// O Record Store: CRUD de registros de usuário. A política mora aqui —
// validação contra a lista efetiva de campos ANTES de persistir e rejeição
// de campos locais que colidem com o esquema global. O backend nunca
// revalida (armazenamento e política ficam desacoplados).
#[derive(Clone)]
pub struct UserService {
    backend: Arc<dyn StorageBackend>,
}

impl UserService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        self.backend.list_users().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<UserRecord>, AppError> {
        self.backend.fetch_user(id).await
    }

    /// Cria um registro: valida contra globais + customFields do rascunho,
    /// gera o id e normaliza `customFields` para [] quando não veio nada.
    pub async fn create(&self, draft: UserDraft) -> Result<UserRecord, AppError> {
        let global = self.backend.list_fields().await?;
        ensure_unique_custom_names(&global, &draft.custom_fields)?;

        let fields = schema::effective_fields(&global, &draft.custom_fields);
        let errors = validation::validate(&draft.values, &fields);
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        let record = draft.into_record(format!("user-{}", Uuid::new_v4()));
        self.backend.insert_user(&record).await
    }

    /// Atualização parcial (merge raso). O resultado do merge é validado
    /// contra a lista efetiva — derivada dos `customFields` do patch quando
    /// enviados, senão dos armazenados — para que um PATCH não consiga
    /// contornar uma regra obrigatória omitindo a chave.
    pub async fn update(&self, id: &str, mut patch: UserPatch) -> Result<UserRecord, AppError> {
        // O patch segue como veio para o backend remoto; chave estrutural
        // injetada no mapa aberto sai antes de qualquer coisa
        patch.strip_structural_keys();

        let stored = self
            .backend
            .fetch_user(id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let global = self.backend.list_fields().await?;
        let custom = patch
            .custom_fields
            .as_deref()
            .unwrap_or(&stored.custom_fields);
        ensure_unique_custom_names(&global, custom)?;

        let mut merged = stored.clone();
        merged.apply_patch(&patch);

        let fields = schema::effective_fields(&global, custom);
        let errors = validation::validate(&merged.values, &fields);
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        self.backend.update_user(id, &patch).await
    }

    /// Remove o registro inteiro, inclusive a lista de campos locais.
    /// Sem undo; a confirmação fica a cargo de quem chama.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.backend.delete_user(id).await
    }
}

// Invariante do esquema: `name` único no conjunto efetivo visível ao
// registro (globais ∪ campos locais dele).
fn ensure_unique_custom_names(
    global: &[FieldDefinition],
    custom: &[FieldDefinition],
) -> Result<(), AppError> {
    let mut seen: HashSet<&str> = global.iter().map(|f| f.name.as_str()).collect();
    for field in custom {
        if !seen.insert(&field.name) {
            return Err(AppError::DuplicateFieldName(field.name.clone()));
        }
    }
    Ok(())
}
