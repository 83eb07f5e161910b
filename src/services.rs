pub mod validation;
pub mod schema;
pub mod field_service;
pub use field_service::FieldService;
pub mod user_service;
pub use user_service::UserService;
pub mod form_session;
pub use form_session::FormSession;
