pub mod config;
pub mod extract;
pub mod record;
pub mod schema;
pub mod validate;

pub use record::{FieldError, IntakeForm};
pub use schema::{
    descriptor, FieldDependency, FieldDescriptor, FieldKind, FieldName, FieldValue,
    EMPLOYMENT_STATUSES, LOAN_PURPOSES,
};
pub use validate::{required_message, validate_value};
