// src/services/form_session.rs

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{FieldDefinition, FieldType, UserDraft, UserPatch, UserRecord},
    services::{schema, validation, FieldService, UserService},
};

// --- SESSÃO DE EDIÇÃO (Orquestração) ---
//
// Uma sessão dirige o fluxo de criar/editar um registro sem UI: valores
// digitados, campos locais em rascunho (não persistidos até o submit) e a
// memória de quais campos locais foram removidos nesta sessão, para que um
// valor antigo não ressuscite na gravação.

enum Mode {
    Create,
    Edit { user_id: String },
}

/// Rascunho de um campo local, antes de ganhar id.
#[derive(Debug, Clone, Default)]
pub struct CustomFieldDraft {
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<String>,
}

pub struct FormSession {
    mode: Mode,
    global_fields: Vec<FieldDefinition>,
    custom_fields: Vec<FieldDefinition>,
    values: Map<String, Value>,
    removed_names: HashSet<String>,
}

impl FormSession {
    /// Abre uma sessão de criação. Reconsulta os campos globais para pegar a
    /// versão mais recente; uma falha de backend nessa leitura inicial
    /// degrada para lista vazia (fail-open) em vez de impedir a sessão.
    pub async fn create(fields: &FieldService) -> Self {
        Self {
            mode: Mode::Create,
            global_fields: load_fields_fail_open(fields).await,
            custom_fields: Vec::new(),
            values: Map::new(),
            removed_names: HashSet::new(),
        }
    }

    /// Abre uma sessão de edição sobre um registro existente.
    pub async fn edit(fields: &FieldService, user: &UserRecord) -> Self {
        Self {
            mode: Mode::Edit {
                user_id: user.id.clone(),
            },
            global_fields: load_fields_fail_open(fields).await,
            custom_fields: user.custom_fields.clone(),
            values: user.values.clone(),
            removed_names: HashSet::new(),
        }
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn custom_fields(&self) -> &[FieldDefinition] {
        &self.custom_fields
    }

    /// A lista efetiva desta sessão: globais + rascunho de campos locais.
    pub fn effective_fields(&self) -> Vec<FieldDefinition> {
        schema::effective_fields(&self.global_fields, &self.custom_fields)
    }

    /// Acrescenta um campo local ao rascunho. Nome e rótulo são
    /// obrigatórios; um nome que já existe na lista efetiva é rejeitado sem
    /// tocar no rascunho. Nada é persistido até o submit.
    pub fn add_custom_field(
        &mut self,
        draft: CustomFieldDraft,
    ) -> Result<FieldDefinition, AppError> {
        let mut errors = HashMap::new();
        if draft.name.trim().is_empty() {
            errors.insert("name".to_string(), "Field name is required".to_string());
        }
        if draft.label.trim().is_empty() {
            errors.insert("label".to_string(), "Field label is required".to_string());
        }
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        if self.effective_fields().iter().any(|f| f.name == draft.name) {
            return Err(AppError::DuplicateFieldName(draft.name));
        }

        let field = FieldDefinition {
            id: format!("custom-{}", Uuid::new_v4()),
            name: draft.name,
            label: draft.label,
            field_type: draft.field_type,
            required: draft.required,
            placeholder: draft.placeholder,
            validation: None,
        };

        // Readicionar um nome removido nesta sessão cancela a remoção
        self.removed_names.remove(&field.name);
        self.custom_fields.push(field.clone());
        Ok(field)
    }

    /// Tira um campo local do rascunho, descarta o valor digitado e anota o
    /// nome para a limpeza do submit. Id desconhecido é ignorado.
    pub fn remove_custom_field(&mut self, id: &str) {
        if let Some(position) = self.custom_fields.iter().position(|f| f.id == id) {
            let removed = self.custom_fields.remove(position);
            self.values.remove(&removed.name);
            self.removed_names.insert(removed.name);
        }
    }

    /// O fluxo de gravação: valida sobre a lista efetiva e aborta sem tocar
    /// no backend se algo falhar; senão limpa as chaves de campos removidos
    /// na sessão, anexa o rascunho de customFields e chama create ou update
    /// conforme o modo. Na edição, cada nome removido vira um `null` no
    /// PATCH para que o merge apague o valor antigo no registro armazenado.
    pub async fn submit(&self, users: &UserService) -> Result<UserRecord, AppError> {
        let fields = self.effective_fields();
        let errors = validation::validate(&self.values, &fields);
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        let mut clean = self.values.clone();
        for name in &self.removed_names {
            clean.remove(name);
        }

        match &self.mode {
            Mode::Create => {
                users
                    .create(UserDraft {
                        custom_fields: self.custom_fields.clone(),
                        values: clean,
                    })
                    .await
            }
            Mode::Edit { user_id } => {
                for name in &self.removed_names {
                    clean.insert(name.clone(), Value::Null);
                }
                users
                    .update(
                        user_id,
                        UserPatch {
                            custom_fields: Some(self.custom_fields.clone()),
                            values: clean,
                        },
                    )
                    .await
            }
        }
    }
}

async fn load_fields_fail_open(fields: &FieldService) -> Vec<FieldDefinition> {
    match fields.list().await {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!("🔥 Falha ao carregar campos globais, seguindo com lista vazia: {}", e);
            Vec::new()
        }
    }
}
