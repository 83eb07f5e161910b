// src/models/fields.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- ENUMS ---

// Os tipos de campo que o operador pode configurar no Form Builder.
// No JSON viajam em minúsculas ("text", "email", ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Textarea,
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

// --- REGRAS DE VALIDAÇÃO (anexadas à definição) ---

// `min`/`max` numéricos fazem parte do formato, mas o motor de validação
// só avalia pattern/minLength/maxLength (ver services/validation.rs).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "^[0-9]+$")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 2)]
    pub min_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 50)]
    pub max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

// --- DEFINIÇÃO DE CAMPO (O Molde) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    // Prefixo marca a origem: "field-..." (global), "custom-..." (do registro)
    #[schema(example = "field-550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,

    // Chave do valor dentro do registro do usuário
    #[schema(example = "dateOfBirth")]
    pub name: String,

    #[schema(example = "Date of Birth")]
    pub label: String,

    #[serde(rename = "type")]
    #[schema(example = "date")]
    pub field_type: FieldType,

    #[serde(default)]
    #[schema(example = true)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "MM/DD/YYYY")]
    pub placeholder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl FieldDefinition {
    /// Um campo local de registro ("custom field") é reconhecido pelo prefixo do id.
    pub fn is_custom(&self) -> bool {
        self.id.starts_with("custom-")
    }

    /// Merge raso de um PATCH: atributo presente sobrescreve, ausente preserva.
    /// `validation`, quando enviado, substitui o objeto anterior por inteiro.
    pub fn apply_patch(&mut self, patch: &FieldPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(validation) = &patch.validation {
            self.validation = Some(validation.clone());
        }
    }
}

// --- PATCH (atualização parcial de uma definição) ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

// --- CAMPOS PADRÃO ---

/// Os quatro campos que acompanham a aplicação, com as regras de validação
/// canônicas anexadas. `resetToDefault` restaura exatamente esta lista,
/// nesta ordem.
pub fn default_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition {
            id: "firstName".to_string(),
            name: "firstName".to_string(),
            label: "First Name".to_string(),
            field_type: FieldType::Text,
            required: true,
            placeholder: Some("Enter first name".to_string()),
            validation: Some(ValidationRules {
                min_length: Some(2),
                max_length: Some(50),
                ..Default::default()
            }),
        },
        FieldDefinition {
            id: "lastName".to_string(),
            name: "lastName".to_string(),
            label: "Last Name".to_string(),
            field_type: FieldType::Text,
            required: true,
            placeholder: Some("Enter last name".to_string()),
            validation: Some(ValidationRules {
                min_length: Some(2),
                max_length: Some(50),
                ..Default::default()
            }),
        },
        FieldDefinition {
            id: "phoneNumber".to_string(),
            name: "phoneNumber".to_string(),
            label: "Phone Number".to_string(),
            field_type: FieldType::Tel,
            required: true,
            placeholder: Some("+1 (555) 000-0000".to_string()),
            validation: Some(ValidationRules {
                pattern: Some(
                    r"^[+]?[(]?[0-9]{1,4}[)]?[-\s\.]?[(]?[0-9]{1,4}[)]?[-\s\.]?[0-9]{1,9}$"
                        .to_string(),
                ),
                ..Default::default()
            }),
        },
        FieldDefinition {
            id: "email".to_string(),
            name: "email".to_string(),
            label: "Email Address".to_string(),
            field_type: FieldType::Email,
            required: true,
            placeholder: Some("example@email.com".to_string()),
            validation: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_serializes_lowercase_under_type_key() {
        let field = FieldDefinition {
            id: "field-1".to_string(),
            name: "bio".to_string(),
            label: "Bio".to_string(),
            field_type: FieldType::Textarea,
            required: false,
            placeholder: None,
            validation: None,
        };

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "textarea");
        // Opcionais ausentes não aparecem no JSON
        assert!(json.get("placeholder").is_none());
        assert!(json.get("validation").is_none());
    }

    #[test]
    fn patch_overwrites_supplied_and_preserves_rest() {
        let mut field = default_fields().remove(0);
        field.apply_patch(&FieldPatch {
            label: Some("Given Name".to_string()),
            required: Some(false),
            ..Default::default()
        });

        assert_eq!(field.label, "Given Name");
        assert!(!field.required);
        // Atributos não enviados ficam como estavam
        assert_eq!(field.name, "firstName");
        assert_eq!(field.validation.as_ref().unwrap().min_length, Some(2));
    }

    #[test]
    fn patch_validation_replaces_wholly() {
        let mut field = default_fields().remove(0);
        field.apply_patch(&FieldPatch {
            validation: Some(ValidationRules {
                max_length: Some(10),
                ..Default::default()
            }),
            ..Default::default()
        });

        let rules = field.validation.unwrap();
        assert_eq!(rules.max_length, Some(10));
        assert_eq!(rules.min_length, None);
    }

    #[test]
    fn default_fields_are_the_documented_four_in_order() {
        let names: Vec<String> = default_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["firstName", "lastName", "phoneNumber", "email"]);
    }
}
