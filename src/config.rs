// src/config.rs

use std::{env, sync::Arc};

use crate::{
    services::{FieldService, UserService},
    storage::{HttpBackend, LocalBackend, MemoryBackend, StorageBackend},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub field_service: FieldService,
    pub user_service: UserService,
}

impl AppState {
    // Carrega as configurações do ambiente e escolhe a variante do backend
    // de persistência na inicialização (nunca um branch em tempo de request)
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mode = env::var("STORAGE_MODE").unwrap_or_else(|_| "local".to_string());

        let backend: Arc<dyn StorageBackend> = match mode.as_str() {
            "http" => {
                let api_url =
                    env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
                tracing::info!("✅ Backend de persistência: API remota em {}", api_url);
                Arc::new(HttpBackend::new(api_url)?)
            }
            "local" => {
                let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());
                tracing::info!("✅ Backend de persistência: blobs JSON em {}", data_dir);
                Arc::new(LocalBackend::new(data_dir)?)
            }
            "memory" => {
                tracing::info!("✅ Backend de persistência: memória (nada sobrevive ao processo)");
                Arc::new(MemoryBackend::new())
            }
            other => anyhow::bail!(
                "STORAGE_MODE desconhecido: '{other}' (use \"http\", \"local\" ou \"memory\")"
            ),
        };

        Ok(Self::with_backend(backend))
    }

    /// Monta o grafo de serviços sobre um backend já construído.
    /// Os testes de integração entram por aqui.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            field_service: FieldService::new(backend.clone()),
            user_service: UserService::new(backend),
        }
    }
}
