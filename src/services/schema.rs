// src/services/schema.rs

use std::collections::HashSet;

use crate::models::{FieldDefinition, UserRecord};

// --- RESOLVEDOR DE ESQUEMA ---
//
// O esquema efetivo de um registro = campos globais (na ordem armazenada)
// seguidos dos campos locais do registro (na ordem deles). Nomes duplicados
// entre as duas fontes são erro de configuração, barrado na hora de criar o
// campo; aqui ninguém faz sombra em ninguém.

pub fn effective_fields(
    global: &[FieldDefinition],
    custom: &[FieldDefinition],
) -> Vec<FieldDefinition> {
    global.iter().chain(custom.iter()).cloned().collect()
}

/// As colunas da tabela: globais na ordem, depois os campos locais de cada
/// registro na ordem armazenada, deduplicados por `name` (o primeiro visto
/// vence). Dois registros podem ter esquemas efetivos diferentes ao mesmo
/// tempo; a tabela mostra a união.
pub fn unique_columns(
    global: &[FieldDefinition],
    users: &[UserRecord],
) -> Vec<FieldDefinition> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::new();

    for field in global {
        if seen.insert(field.name.clone()) {
            columns.push(field.clone());
        }
    }

    for user in users {
        for field in &user.custom_fields {
            if seen.insert(field.name.clone()) {
                columns.push(field.clone());
            }
        }
    }

    columns
}
