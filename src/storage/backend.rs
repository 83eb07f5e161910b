// src/storage/backend.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{FieldDefinition, FieldPatch, UserPatch, UserRecord},
};

// O contrato de persistência. Duas famílias de recursos ("fields" e "users"),
// implementado por uma API HTTP remota ou por blobs JSON locais, escolhido na
// inicialização. O backend só guarda e devolve dados: política (validação,
// nomes duplicados, geração de id) mora nos services.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    // --- FIELDS ---

    async fn list_fields(&self) -> Result<Vec<FieldDefinition>, AppError>;

    async fn insert_field(&self, field: &FieldDefinition) -> Result<(), AppError>;

    async fn update_field(
        &self,
        id: &str,
        patch: &FieldPatch,
    ) -> Result<FieldDefinition, AppError>;

    async fn delete_field(&self, id: &str) -> Result<(), AppError>;

    /// Substituição em massa da lista inteira, atômica. É sobre esta operação
    /// que o `resetToDefault` é construído.
    async fn replace_fields(&self, fields: &[FieldDefinition]) -> Result<(), AppError>;

    // --- USERS ---

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError>;

    /// Ausente não é erro: devolve `Ok(None)`.
    async fn fetch_user(&self, id: &str) -> Result<Option<UserRecord>, AppError>;

    async fn insert_user(&self, user: &UserRecord) -> Result<UserRecord, AppError>;

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, AppError>;

    async fn delete_user(&self, id: &str) -> Result<(), AppError>;
}
