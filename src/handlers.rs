pub mod fields;
pub mod users;
