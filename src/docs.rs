// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Fields ---
        handlers::fields::list_fields,
        handlers::fields::create_field,
        handlers::fields::update_field,
        handlers::fields::delete_field,
        handlers::fields::replace_fields,
        handlers::fields::reset_fields,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::list_columns,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,
    ),
    components(
        schemas(
            // --- Fields ---
            models::fields::FieldType,
            models::fields::ValidationRules,
            models::fields::FieldDefinition,
            models::fields::FieldPatch,

            // --- Payloads ---
            handlers::fields::CreateFieldPayload,
        )
    ),
    tags(
        (name = "Fields", description = "Configuração do esquema global (Form Builder)"),
        (name = "Users", description = "Gestão de registros de usuário (User Management)")
    )
)]
pub struct ApiDoc;
