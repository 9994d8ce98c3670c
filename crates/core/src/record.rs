use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{descriptor, FieldName, FieldValue};
use crate::validate::{required_message, validate_value};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FieldName,
    pub message: String,
}

/// The single source of truth for the record being collected: one value per
/// schema field plus the current validation error map. Both the form surface
/// and the dialogue engine mutate it through [`IntakeForm::update`] only.
#[derive(Clone, Debug, Serialize)]
pub struct IntakeForm {
    values: BTreeMap<FieldName, FieldValue>,
    errors: BTreeMap<FieldName, String>,
}

impl IntakeForm {
    /// Seeds every schema field with `Empty`. The field set never changes
    /// after this.
    pub fn new() -> Self {
        let values =
            FieldName::ALL.into_iter().map(|field| (field, FieldValue::Empty)).collect();
        Self { values, errors: BTreeMap::new() }
    }

    pub fn value(&self, field: FieldName) -> &FieldValue {
        &self.values[&field]
    }

    pub fn values(&self) -> &BTreeMap<FieldName, FieldValue> {
        &self.values
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<FieldName, String> {
        &self.errors
    }

    /// The one mutation path. Writes the value unconditionally, then
    /// revalidates that field and replaces its error-map entry. Never touches
    /// other fields and never cascades to dependents.
    pub fn update(&mut self, field: FieldName, value: FieldValue) {
        self.values.insert(field, value);
        match self.check_field(field) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(&field),
        };
    }

    /// A field governed by a dependency is active only while the controlling
    /// field holds the trigger value. Unconditional fields are always active.
    pub fn is_active(&self, field: FieldName) -> bool {
        match descriptor(field).depends_on {
            Some(dependency) => self.value(dependency.field) == &dependency.value,
            None => true,
        }
    }

    /// Full-record submission check: revalidates every active field,
    /// refreshes the error map for them, and returns the aggregate list.
    /// An empty result means the record is ready to submit.
    pub fn validate_all(&mut self) -> Vec<FieldError> {
        let mut failures = Vec::new();

        for field in FieldName::ALL {
            if !self.is_active(field) {
                continue;
            }
            match self.check_field(field) {
                Some(message) => {
                    self.errors.insert(field, message.clone());
                    failures.push(FieldError { field, message });
                }
                None => {
                    self.errors.remove(&field);
                }
            }
        }

        failures
    }

    /// Combines required-ness with format validation: empty required active
    /// fields report a required message, present values go through the pure
    /// per-field validator.
    fn check_field(&self, field: FieldName) -> Option<String> {
        let value = self.value(field);
        if value.is_empty() {
            return (descriptor(field).required && self.is_active(field))
                .then(|| required_message(field));
        }
        validate_value(field, value)
    }
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}
