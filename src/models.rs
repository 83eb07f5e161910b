pub mod fields;
pub use fields::{default_fields, FieldDefinition, FieldPatch, FieldType, ValidationRules};
pub mod users;
pub use users::{UserDraft, UserPatch, UserRecord};
