// src/services/field_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{default_fields, FieldDefinition, FieldPatch},
    storage::StorageBackend,
};

// O Field Store: o esquema global (lista ordenada de definições), com a
// política em cima do backend — unicidade de nome, geração de id e o reset
// para os campos padrão.
#[derive(Clone)]
pub struct FieldService {
    backend: Arc<dyn StorageBackend>,
}

impl FieldService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<FieldDefinition>, AppError> {
        self.backend.list_fields().await
    }

    /// Acrescenta uma definição ao fim da lista global. `name` e `id`
    /// precisam ser inéditos entre os campos globais; id vazio ganha um
    /// "field-{uuid}".
    pub async fn add(&self, mut field: FieldDefinition) -> Result<FieldDefinition, AppError> {
        let existing = self.backend.list_fields().await?;
        if existing.iter().any(|f| f.name == field.name) {
            return Err(AppError::DuplicateFieldName(field.name));
        }
        if !field.id.is_empty() && existing.iter().any(|f| f.id == field.id) {
            return Err(AppError::DuplicateFieldId(field.id));
        }

        if field.id.is_empty() {
            field.id = format!("field-{}", Uuid::new_v4());
        }

        self.backend.insert_field(&field).await?;
        Ok(field)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: FieldPatch,
    ) -> Result<FieldDefinition, AppError> {
        // Renomear não pode colidir com outro campo global
        if let Some(new_name) = &patch.name {
            let existing = self.backend.list_fields().await?;
            if existing.iter().any(|f| f.id != id && f.name == *new_name) {
                return Err(AppError::DuplicateFieldName(new_name.clone()));
            }
        }

        self.backend.update_field(id, &patch).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.backend.delete_field(id).await
    }

    /// Troca a lista global inteira de uma vez. Rejeita nomes ou ids
    /// repetidos dentro da própria lista.
    pub async fn replace_all(&self, fields: Vec<FieldDefinition>) -> Result<(), AppError> {
        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();
        for field in &fields {
            if !seen_names.insert(field.name.as_str()) {
                return Err(AppError::DuplicateFieldName(field.name.clone()));
            }
            if !field.id.is_empty() && !seen_ids.insert(field.id.as_str()) {
                return Err(AppError::DuplicateFieldId(field.id.clone()));
            }
        }

        self.backend.replace_fields(&fields).await
    }

    /// Restaura os quatro campos padrão, na ordem documentada, com as regras
    /// de validação canônicas. Implementado como uma única substituição em
    /// massa: atômico em qualquer backend, sem janela "vazio e repovoando".
    pub async fn reset_to_default(&self) -> Result<Vec<FieldDefinition>, AppError> {
        let defaults = default_fields();
        self.backend.replace_fields(&defaults).await?;
        tracing::info!("✅ Campos restaurados para o padrão ({})", defaults.len());
        Ok(defaults)
    }
}
