// src/models/users.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::fields::FieldDefinition;

// Chaves que pertencem à estrutura do registro, nunca ao mapa aberto. Sem
// esta lista, um corpo com `"id": ...` entraria no mapa achatado e o registro
// serializaria com a chave duplicada, sequestrando a identidade num parse
// last-wins do outro lado.
const STRUCTURAL_KEYS: [&str; 2] = ["id", "customFields"];

// --- REGISTRO DE USUÁRIO (O Dado) ---

// Um registro é um mapa aberto: além de `id` e `customFields`, as chaves são
// os `name`s dos campos do esquema efetivo. O `flatten` + preserve_order do
// serde_json mantém o mapa como uma lista de pares ordenada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,

    // Campos de esquema locais deste registro. Sempre serializado,
    // normalizado para [] quando não há nenhum.
    #[serde(default)]
    pub custom_fields: Vec<FieldDefinition>,

    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl UserRecord {
    /// Merge raso de um PATCH, no espírito do merge-patch JSON: chave enviada
    /// sobrescreve, chave ausente persiste e `null` apaga a chave (é assim
    /// que se remove o valor de um campo local descartado). `customFields`,
    /// quando enviado, substitui a lista inteira (nunca merge elemento a
    /// elemento).
    pub fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(custom_fields) = &patch.custom_fields {
            self.custom_fields = custom_fields.clone();
        }
        for (key, value) in &patch.values {
            if STRUCTURAL_KEYS.contains(&key.as_str()) {
                continue;
            }
            if value.is_null() {
                self.values.remove(key);
            } else {
                self.values.insert(key.clone(), value.clone());
            }
        }
    }
}

// --- CRIAÇÃO (sem id: o store gera) ---

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default)]
    pub custom_fields: Vec<FieldDefinition>,

    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl UserDraft {
    /// O id vem sempre de quem chama; qualquer chave estrutural que o cliente
    /// tenha enfiado no mapa aberto é descartada aqui.
    pub fn into_record(mut self, id: String) -> UserRecord {
        for key in STRUCTURAL_KEYS {
            self.values.remove(key);
        }
        UserRecord {
            id,
            custom_fields: self.custom_fields,
            values: self.values,
        }
    }
}

// --- ATUALIZAÇÃO PARCIAL ---

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<FieldDefinition>>,

    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl UserPatch {
    /// Descarta chaves estruturais do mapa aberto antes de o patch viajar
    /// para o backend: `id` não é atualizável e `customFields` só anda no
    /// campo nomeado.
    pub fn strip_structural_keys(&mut self) {
        for key in STRUCTURAL_KEYS {
            self.values.remove(key);
        }
    }
}
