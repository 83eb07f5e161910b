// src/services/validation.rs

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{FieldDefinition, FieldType};

// Padrão "RFC-lite": alguma coisa @ alguma coisa . alguma coisa, sem espaços.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("padrão de e-mail inválido"));

// --- MOTOR DE VALIDAÇÃO ---
//
// Função pura: valida o mapa de valores contra a lista efetiva de definições
// e devolve um mapa chave do campo -> mensagem. Mapa vazio = tudo passou.
// Por campo, a primeira regra que falha vence; nunca acumulamos duas
// mensagens para o mesmo campo.
pub fn validate(
    values: &Map<String, Value>,
    fields: &[FieldDefinition],
) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    for field in fields {
        let text = values.get(&field.name).and_then(value_as_text);
        let trimmed = text.as_deref().map(str::trim).unwrap_or("");

        // 1. Obrigatoriedade: ausente, vazio ou só espaços
        if field.required && trimmed.is_empty() {
            errors.insert(field.name.clone(), format!("{} is required", field.label));
            continue;
        }

        // Valor vazio em campo opcional: nada mais a checar
        if trimmed.is_empty() {
            continue;
        }
        let text = text.unwrap_or_default();

        // 2. E-mail
        if field.field_type == FieldType::Email && !EMAIL_RE.is_match(&text) {
            errors.insert(field.name.clone(), "Invalid email address".to_string());
            continue;
        }

        // 3. Telefone com padrão configurado pelo operador.
        // Um padrão que não compila não derruba o campo: a regra é pulada.
        if field.field_type == FieldType::Tel {
            if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
                if let Ok(re) = Regex::new(pattern) {
                    if !re.is_match(&text) {
                        errors.insert(
                            field.name.clone(),
                            "Invalid phone number format".to_string(),
                        );
                        continue;
                    }
                }
            }
        }

        // 4 e 5. Comprimento (em caracteres, não bytes)
        let length = text.chars().count();
        if let Some(rules) = &field.validation {
            if let Some(min) = rules.min_length {
                if length < min {
                    errors.insert(
                        field.name.clone(),
                        format!("Minimum {} characters required", min),
                    );
                    continue;
                }
            }
            if let Some(max) = rules.max_length {
                if length > max {
                    errors.insert(
                        field.name.clone(),
                        format!("Maximum {} characters allowed", max),
                    );
                }
            }
        }
    }

    errors
}

// Escalares não-string são validados pelo texto que exibem; array/objeto não
// têm texto razoável e contam como ausentes.
fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_fields, ValidationRules};
    use serde_json::json;

    fn field(name: &str, field_type: FieldType, required: bool) -> FieldDefinition {
        FieldDefinition {
            id: format!("field-{name}"),
            name: name.to_string(),
            label: name.to_string(),
            field_type,
            required,
            placeholder: None,
            validation: None,
        }
    }

    fn values(json: Value) -> Map<String, Value> {
        json.as_object().unwrap().clone()
    }

    #[test]
    fn required_field_fails_on_empty_record() {
        let fields = vec![field("firstName", FieldType::Text, true)];
        let errors = validate(&Map::new(), &fields);
        assert_eq!(errors["firstName"], "firstName is required");
    }

    #[test]
    fn required_message_uses_the_label() {
        let mut f = field("firstName", FieldType::Text, true);
        f.label = "First Name".to_string();
        let errors = validate(&Map::new(), &[f]);
        assert_eq!(errors["firstName"], "First Name is required");
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let fields = vec![field("firstName", FieldType::Text, true)];
        let errors = validate(&values(json!({ "firstName": "   " })), &fields);
        assert_eq!(errors["firstName"], "firstName is required");
    }

    #[test]
    fn empty_optional_field_passes_all_rules() {
        let mut f = field("nickname", FieldType::Email, false);
        f.validation = Some(ValidationRules {
            min_length: Some(5),
            ..Default::default()
        });
        let errors = validate(&values(json!({ "nickname": "" })), &[f]);
        assert!(errors.is_empty());
    }

    #[test]
    fn email_rule_accepts_and_rejects() {
        let fields = vec![field("email", FieldType::Email, false)];

        for bad in ["not-an-email", "a@b", "a b@c.com", "@x.com"] {
            let errors = validate(&values(json!({ "email": bad })), &fields);
            assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email address"), "{bad}");
        }
        for good in ["ann@example.com", "a.b+c@d-e.org"] {
            let errors = validate(&values(json!({ "email": good })), &fields);
            assert!(errors.is_empty(), "{good}");
        }
    }

    #[test]
    fn tel_pattern_comes_from_the_definition() {
        let mut f = field("phoneNumber", FieldType::Tel, false);
        f.validation = Some(ValidationRules {
            pattern: Some(r"^[0-9]{8}$".to_string()),
            ..Default::default()
        });

        let errors = validate(&values(json!({ "phoneNumber": "abc" })), &[f.clone()]);
        assert_eq!(errors["phoneNumber"], "Invalid phone number format");

        let errors = validate(&values(json!({ "phoneNumber": "12345678" })), &[f]);
        assert!(errors.is_empty());
    }

    #[test]
    fn tel_without_pattern_is_not_checked() {
        let fields = vec![field("phoneNumber", FieldType::Tel, false)];
        let errors = validate(&values(json!({ "phoneNumber": "whatever" })), &fields);
        assert!(errors.is_empty());
    }

    #[test]
    fn broken_tel_pattern_skips_the_rule() {
        let mut f = field("phoneNumber", FieldType::Tel, false);
        f.validation = Some(ValidationRules {
            pattern: Some("([".to_string()),
            ..Default::default()
        });
        let errors = validate(&values(json!({ "phoneNumber": "123" })), &[f]);
        assert!(errors.is_empty());
    }

    #[test]
    fn length_rules_use_characters() {
        let mut f = field("firstName", FieldType::Text, false);
        f.validation = Some(ValidationRules {
            min_length: Some(2),
            max_length: Some(4),
            ..Default::default()
        });

        let errors = validate(&values(json!({ "firstName": "é" })), &[f.clone()]);
        assert_eq!(errors["firstName"], "Minimum 2 characters required");

        let errors = validate(&values(json!({ "firstName": "ééééé" })), &[f.clone()]);
        assert_eq!(errors["firstName"], "Maximum 4 characters allowed");

        let errors = validate(&values(json!({ "firstName": "éé" })), &[f]);
        assert!(errors.is_empty());
    }

    #[test]
    fn first_failing_rule_wins() {
        // "a b@c" falha no e-mail E no minLength; só a mensagem de e-mail sai
        let mut f = field("email", FieldType::Email, true);
        f.validation = Some(ValidationRules {
            min_length: Some(20),
            ..Default::default()
        });
        let errors = validate(&values(json!({ "email": "a b@c" })), &[f]);
        assert_eq!(errors["email"], "Invalid email address");
    }

    #[test]
    fn numbers_validate_through_their_text() {
        let mut f = field("age", FieldType::Number, true);
        f.validation = Some(ValidationRules {
            max_length: Some(3),
            ..Default::default()
        });

        let errors = validate(&values(json!({ "age": 42 })), &[f.clone()]);
        assert!(errors.is_empty());

        let errors = validate(&values(json!({ "age": 10000 })), &[f]);
        assert_eq!(errors["age"], "Maximum 3 characters allowed");
    }

    #[test]
    fn default_scenario_missing_email_fails() {
        let errors = validate(&values(json!({
            "firstName": "Ann", "lastName": "Lee", "phoneNumber": "+1 555 0000"
        })), &default_fields());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], "Email Address is required");
    }
}
