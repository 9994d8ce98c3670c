use crate::extract::is_valid_email;
use crate::schema::{descriptor, FieldKind, FieldName, FieldValue};

pub const LOAN_AMOUNT_MIN: i64 = 1_000;
pub const LOAN_AMOUNT_MAX: i64 = 1_000_000;
pub const CREDIT_SCORE_MIN: i64 = 300;
pub const CREDIT_SCORE_MAX: i64 = 850;
pub const NOTES_MAX_CHARS: usize = 1_000;

/// Format and range validation for a present value. Pure and per-field:
/// never looks at other fields, never reports missing values. Required-ness
/// for empty values is the record store's concern.
pub fn validate_value(field: FieldName, value: &FieldValue) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    if let Some(mismatch) = kind_mismatch(field, value) {
        return Some(mismatch);
    }

    match field {
        FieldName::FullName => {
            let name = value.as_text()?;
            (name.trim().len() < 2).then(|| "Name must be at least 2 characters".to_string())
        }
        FieldName::Email => {
            let email = value.as_text()?;
            (!is_valid_email(email.trim())).then(|| "Invalid email format".to_string())
        }
        FieldName::LoanAmount => {
            let amount = value.as_number()?;
            if amount < LOAN_AMOUNT_MIN {
                Some("Minimum loan amount is $1,000".to_string())
            } else if amount > LOAN_AMOUNT_MAX {
                Some("Maximum loan amount is $1,000,000".to_string())
            } else {
                None
            }
        }
        FieldName::CreditScore => {
            let score = value.as_number()?;
            (!(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&score))
                .then(|| "Credit score must be between 300 and 850".to_string())
        }
        FieldName::MonthlyIncome => {
            let income = value.as_number()?;
            (income < 0).then(|| "Monthly income cannot be negative".to_string())
        }
        FieldName::AdditionalNotes => {
            let notes = value.as_text()?;
            (notes.chars().count() > NOTES_MAX_CHARS)
                .then(|| "Notes cannot exceed 1000 characters".to_string())
        }
        FieldName::LoanPurpose
        | FieldName::EmploymentStatus
        | FieldName::HasCollateral
        | FieldName::CollateralType => None,
    }
}

/// Message attached to a required active field that is still empty.
pub fn required_message(field: FieldName) -> String {
    match field {
        FieldName::FullName => "Name is required".to_string(),
        FieldName::Email => "Email is required".to_string(),
        FieldName::LoanAmount => "Loan amount is required".to_string(),
        FieldName::LoanPurpose => "Loan purpose is required".to_string(),
        FieldName::EmploymentStatus => "Employment status is required".to_string(),
        FieldName::MonthlyIncome => "Monthly income is required".to_string(),
        FieldName::CreditScore => "Credit score is required".to_string(),
        FieldName::HasCollateral => "Please indicate if you have collateral".to_string(),
        FieldName::CollateralType | FieldName::AdditionalNotes => {
            format!("{} is required", descriptor(field).label)
        }
    }
}

fn kind_mismatch(field: FieldName, value: &FieldValue) -> Option<String> {
    let kind = descriptor(field).kind;
    let matches_kind = match kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Select | FieldKind::TextArea => {
            matches!(value, FieldValue::Text(_))
        }
        FieldKind::Number => matches!(value, FieldValue::Number(_)),
        FieldKind::Boolean => matches!(value, FieldValue::Bool(_)),
    };

    (!matches_kind)
        .then(|| format!("{} has an unexpected value type", descriptor(field).label))
}

#[cfg(test)]
mod tests {
    use crate::schema::{FieldName, FieldValue};

    use super::validate_value;

    #[test]
    fn empty_values_are_never_format_errors() {
        for field in FieldName::ALL {
            assert_eq!(validate_value(field, &FieldValue::Empty), None, "{field:?}");
        }
    }

    #[test]
    fn loan_amount_enforces_inclusive_bounds() {
        let check = |amount| validate_value(FieldName::LoanAmount, &FieldValue::Number(amount));
        assert!(check(999).is_some());
        assert_eq!(check(1_000), None);
        assert_eq!(check(1_000_000), None);
        assert_eq!(check(1_000_001).as_deref(), Some("Maximum loan amount is $1,000,000"));
    }

    #[test]
    fn credit_score_enforces_inclusive_bounds() {
        let check = |score| validate_value(FieldName::CreditScore, &FieldValue::Number(score));
        assert_eq!(check(299).as_deref(), Some("Credit score must be between 300 and 850"));
        assert_eq!(check(300), None);
        assert_eq!(check(850), None);
        assert!(check(851).is_some());
    }

    #[test]
    fn monthly_income_rejects_negatives_only() {
        assert!(validate_value(FieldName::MonthlyIncome, &FieldValue::Number(-1)).is_some());
        assert_eq!(validate_value(FieldName::MonthlyIncome, &FieldValue::Number(0)), None);
    }

    #[test]
    fn name_needs_two_characters() {
        assert!(validate_value(FieldName::FullName, &FieldValue::text("J")).is_some());
        assert_eq!(validate_value(FieldName::FullName, &FieldValue::text("Jo")), None);
    }

    #[test]
    fn email_shape_is_checked() {
        assert_eq!(
            validate_value(FieldName::Email, &FieldValue::text("not-an-email")).as_deref(),
            Some("Invalid email format")
        );
        assert_eq!(validate_value(FieldName::Email, &FieldValue::text("jo@bank.com")), None);
    }

    #[test]
    fn notes_are_capped_at_a_thousand_characters() {
        let long = "x".repeat(1_001);
        assert!(validate_value(FieldName::AdditionalNotes, &FieldValue::text(long)).is_some());
        let exact = "x".repeat(1_000);
        assert_eq!(validate_value(FieldName::AdditionalNotes, &FieldValue::text(exact)), None);
    }

    #[test]
    fn wrong_value_shape_is_a_format_error() {
        let error = validate_value(FieldName::LoanAmount, &FieldValue::text("lots"))
            .expect("text is not a valid loan amount");
        assert!(error.contains("Loan Amount"));
        assert!(validate_value(FieldName::HasCollateral, &FieldValue::Number(1)).is_some());
    }
}
