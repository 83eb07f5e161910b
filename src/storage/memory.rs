// src/storage/memory.rs

use std::sync::RwLock;

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{FieldDefinition, FieldPatch, UserPatch, UserRecord},
    storage::backend::StorageBackend,
};

// Variante em memória: útil para o modo efêmero (STORAGE_MODE=memory) e como
// dublê nos testes de integração. Mesma semântica de merge dos outros
// backends, nada sobrevive ao processo.
#[derive(Default)]
pub struct MemoryBackend {
    fields: RwLock<Vec<FieldDefinition>>,
    users: RwLock<Vec<UserRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    // --- FIELDS ---

    async fn list_fields(&self) -> Result<Vec<FieldDefinition>, AppError> {
        Ok(self.fields.read().expect("lock envenenado").clone())
    }

    async fn insert_field(&self, field: &FieldDefinition) -> Result<(), AppError> {
        self.fields
            .write()
            .expect("lock envenenado")
            .push(field.clone());
        Ok(())
    }

    async fn update_field(
        &self,
        id: &str,
        patch: &FieldPatch,
    ) -> Result<FieldDefinition, AppError> {
        let mut fields = self.fields.write().expect("lock envenenado");
        let field = fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(AppError::FieldNotFound)?;
        field.apply_patch(patch);
        Ok(field.clone())
    }

    async fn delete_field(&self, id: &str) -> Result<(), AppError> {
        let mut fields = self.fields.write().expect("lock envenenado");
        let before = fields.len();
        fields.retain(|f| f.id != id);
        if fields.len() == before {
            return Err(AppError::FieldNotFound);
        }
        Ok(())
    }

    async fn replace_fields(&self, fields: &[FieldDefinition]) -> Result<(), AppError> {
        *self.fields.write().expect("lock envenenado") = fields.to_vec();
        Ok(())
    }

    // --- USERS ---

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(self.users.read().expect("lock envenenado").clone())
    }

    async fn fetch_user(&self, id: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .read()
            .expect("lock envenenado")
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<UserRecord, AppError> {
        self.users
            .write()
            .expect("lock envenenado")
            .push(user.clone());
        Ok(user.clone())
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, AppError> {
        let mut users = self.users.write().expect("lock envenenado");
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::UserNotFound)?;
        user.apply_patch(patch);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let mut users = self.users.write().expect("lock envenenado");
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
