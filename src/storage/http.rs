// src/storage/http.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    common::error::AppError,
    models::{FieldDefinition, FieldPatch, UserPatch, UserRecord},
    storage::backend::StorageBackend,
};

// Timeout fixo por requisição: nenhuma chamada ao upstream fica pendurada
// para sempre; o erro vira uma falha genérica de backend para o chamador.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Variante remota do backend: uma API JSON com os recursos /fields e /users.
// Qualquer resposta não-2xx é falha; a exceção é GET /users/{id}, onde 404
// significa "ausente" e não erro.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl StorageBackend for HttpBackend {
    // --- FIELDS ---

    async fn list_fields(&self) -> Result<Vec<FieldDefinition>, AppError> {
        let fields = self
            .client
            .get(self.url("/fields"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(fields)
    }

    async fn insert_field(&self, field: &FieldDefinition) -> Result<(), AppError> {
        self.client
            .post(self.url("/fields"))
            .json(field)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_field(
        &self,
        id: &str,
        patch: &FieldPatch,
    ) -> Result<FieldDefinition, AppError> {
        let field = self
            .client
            .patch(self.url(&format!("/fields/{id}")))
            .json(patch)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(field)
    }

    async fn delete_field(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(self.url(&format!("/fields/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn replace_fields(&self, fields: &[FieldDefinition]) -> Result<(), AppError> {
        // PUT em massa: o upstream troca a lista inteira de uma vez
        self.client
            .put(self.url("/fields"))
            .json(fields)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // --- USERS ---

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        let users = self
            .client
            .get(self.url("/users"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    async fn fetch_user(&self, id: &str) -> Result<Option<UserRecord>, AppError> {
        let response = self
            .client
            .get(self.url(&format!("/users/{id}")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let user = response.error_for_status()?.json().await?;
        Ok(Some(user))
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<UserRecord, AppError> {
        let created = self
            .client
            .post(self.url("/users"))
            .json(user)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<UserRecord, AppError> {
        // O upstream faz o merge raso do PATCH e devolve o registro resultante
        let updated = self
            .client
            .patch(self.url(&format!("/users/{id}")))
            .json(patch)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
