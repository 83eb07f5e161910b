// src/storage/local.rs

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::{
    common::error::AppError,
    models::{FieldDefinition, FieldPatch, UserPatch, UserRecord},
    storage::backend::StorageBackend,
};

const FIELDS_BLOB: &str = "fields.json";
const USERS_BLOB: &str = "users.json";

// Variante local do backend: dois blobs nomeados no diretório de dados, cada
// um com a lista completa serializada, sem versionamento de esquema. Um blob
// ausente lê como lista vazia. Cada operação reescreve o blob inteiro, então
// toda escrita (inclusive o reset) é atômica do ponto de vista do chamador;
// o mutex por recurso serializa o read-modify-write.
pub struct LocalBackend {
    dir: PathBuf,
    fields_lock: Mutex<()>,
    users_lock: Mutex<()>,
}

impl LocalBackend {
    pub fn new(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            fields_lock: Mutex::new(()),
            users_lock: Mutex::new(()),
        })
    }

    async fn load<T: DeserializeOwned>(&self, blob: &str) -> Result<Vec<T>, AppError> {
        match tokio::fs::read(self.dir.join(blob)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save<T: Serialize>(&self, blob: &str, items: &[T]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(self.dir.join(blob), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    // --- FIELDS ---

    async fn list_fields(&self) -> Result<Vec<FieldDefinition>, AppError> {
        let _guard = self.fields_lock.lock().await;
        self.load(FIELDS_BLOB).await
    }

    async fn insert_field(&self, field: &FieldDefinition) -> Result<(), AppError> {
        let _guard = self.fields_lock.lock().await;
        let mut fields: Vec<FieldDefinition> = self.load(FIELDS_BLOB).await?;
        fields.push(field.clone());
        self.save(FIELDS_BLOB, &fields).await
    }

    async fn update_field(
        &self,
        id: &str,
        patch: &FieldPatch,
    ) -> Result<FieldDefinition, AppError> {
        let _guard = self.fields_lock.lock().await;
        let mut fields: Vec<FieldDefinition> = self.load(FIELDS_BLOB).await?;

        let field = fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(AppError::FieldNotFound)?;
        field.apply_patch(patch);
        let updated = field.clone();

        self.save(FIELDS_BLOB, &fields).await?;
        Ok(updated)
    }

    async fn delete_field(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.fields_lock.lock().await;
        let mut fields: Vec<FieldDefinition> = self.load(FIELDS_BLOB).await?;

        let before = fields.len();
        fields.retain(|f| f.id != id);
        if fields.len() == before {
            return Err(AppError::FieldNotFound);
        }

        self.save(FIELDS_BLOB, &fields).await
    }

    async fn replace_fields(&self, fields: &[FieldDefinition]) -> Result<(), AppError> {
        let _guard = self.fields_lock.lock().await;
        self.save(FIELDS_BLOB, fields).await
    }

    // --- USERS ---

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let _guard = self.users_lock.lock().await;
        self.load(USERS_BLOB).await
    }

    async fn fetch_user(&self, id: &str) -> Result<Option<UserRecord>, AppError> {
        let _guard = self.users_lock.lock().await;
        let users: Vec<UserRecord> = self.load(USERS_BLOB).await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<UserRecord, AppError> {
        let _guard = self.users_lock.lock().await;
        let mut users: Vec<UserRecord> = self.load(USERS_BLOB).await?;
        users.push(user.clone());
        self.save(USERS_BLOB, &users).await?;
        Ok(user.clone())
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, AppError> {
        let _guard = self.users_lock.lock().await;
        let mut users: Vec<UserRecord> = self.load(USERS_BLOB).await?;

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::UserNotFound)?;
        user.apply_patch(patch);
        let updated = user.clone();

        self.save(USERS_BLOB, &users).await?;
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.users_lock.lock().await;
        let mut users: Vec<UserRecord> = self.load(USERS_BLOB).await?;

        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::UserNotFound);
        }

        self.save(USERS_BLOB, &users).await
    }
}
