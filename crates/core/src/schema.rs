use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of collectible fields. Fields are never added or removed
/// at runtime; every record carries a slot for each of these.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FullName,
    Email,
    LoanAmount,
    LoanPurpose,
    EmploymentStatus,
    MonthlyIncome,
    CreditScore,
    HasCollateral,
    CollateralType,
    AdditionalNotes,
}

impl FieldName {
    /// Declared schema order, used for form rendering and full-record
    /// validation. The dialogue elicitation order is defined separately.
    pub const ALL: [FieldName; 10] = [
        FieldName::FullName,
        FieldName::Email,
        FieldName::LoanAmount,
        FieldName::LoanPurpose,
        FieldName::EmploymentStatus,
        FieldName::MonthlyIncome,
        FieldName::CreditScore,
        FieldName::HasCollateral,
        FieldName::CollateralType,
        FieldName::AdditionalNotes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::LoanAmount => "loanAmount",
            Self::LoanPurpose => "loanPurpose",
            Self::EmploymentStatus => "employmentStatus",
            Self::MonthlyIncome => "monthlyIncome",
            Self::CreditScore => "creditScore",
            Self::HasCollateral => "hasCollateral",
            Self::CollateralType => "collateralType",
            Self::AdditionalNotes => "additionalNotes",
        }
    }

    /// Spoken form of the field name, for matching utterances like
    /// "what's a credit score?".
    pub fn spoken_name(&self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::Email => "email",
            Self::LoanAmount => "loan amount",
            Self::LoanPurpose => "loan purpose",
            Self::EmploymentStatus => "employment status",
            Self::MonthlyIncome => "monthly income",
            Self::CreditScore => "credit score",
            Self::HasCollateral => "collateral",
            Self::CollateralType => "collateral type",
            Self::AdditionalNotes => "additional notes",
        }
    }

    pub fn label(&self) -> &'static str {
        descriptor(*self).label
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown field name `{0}`")]
pub struct UnknownFieldName(String);

impl std::str::FromStr for FieldName {
    type Err = UnknownFieldName;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownFieldName(trimmed.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Select,
    Boolean,
    TextArea,
}

/// Current value of a field, tagged by shape. `Empty` is the unset state
/// every field starts in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(i64),
    Bool(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// Visibility/required-ness dependency: the owning field is only active
/// while `field` currently holds `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDependency {
    pub field: FieldName,
    pub value: FieldValue,
}

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub depends_on: Option<FieldDependency>,
    pub help_text: &'static str,
}

/// Static schema table. One descriptor per field, defined once, exhaustive
/// over `FieldName`.
pub fn descriptor(field: FieldName) -> FieldDescriptor {
    match field {
        FieldName::FullName => FieldDescriptor {
            label: "Full Name",
            kind: FieldKind::Text,
            required: true,
            depends_on: None,
            help_text: "Please enter your legal full name",
        },
        FieldName::Email => FieldDescriptor {
            label: "Email Address",
            kind: FieldKind::Email,
            required: true,
            depends_on: None,
            help_text: "Enter your primary email address",
        },
        FieldName::LoanAmount => FieldDescriptor {
            label: "Loan Amount",
            kind: FieldKind::Number,
            required: true,
            depends_on: None,
            help_text: "Enter the amount you wish to borrow (USD)",
        },
        FieldName::LoanPurpose => FieldDescriptor {
            label: "Loan Purpose",
            kind: FieldKind::Select,
            required: true,
            depends_on: None,
            help_text: "Select the primary purpose for this loan",
        },
        FieldName::EmploymentStatus => FieldDescriptor {
            label: "Employment Status",
            kind: FieldKind::Select,
            required: true,
            depends_on: None,
            help_text: "Select your current employment status",
        },
        FieldName::MonthlyIncome => FieldDescriptor {
            label: "Monthly Income",
            kind: FieldKind::Number,
            required: true,
            depends_on: None,
            help_text: "Enter your average monthly income (USD)",
        },
        FieldName::CreditScore => FieldDescriptor {
            label: "Credit Score",
            kind: FieldKind::Number,
            required: true,
            depends_on: None,
            help_text: "Enter your current credit score",
        },
        FieldName::HasCollateral => FieldDescriptor {
            label: "Do you have collateral?",
            kind: FieldKind::Boolean,
            required: true,
            depends_on: None,
            help_text: "Indicate if you have any assets to offer as collateral",
        },
        FieldName::CollateralType => FieldDescriptor {
            label: "Collateral Type",
            kind: FieldKind::Text,
            required: false,
            depends_on: Some(FieldDependency {
                field: FieldName::HasCollateral,
                value: FieldValue::Bool(true),
            }),
            help_text: "Describe the type of collateral you can offer",
        },
        FieldName::AdditionalNotes => FieldDescriptor {
            label: "Additional Notes",
            kind: FieldKind::TextArea,
            required: false,
            depends_on: None,
            help_text: "Any additional information you would like to provide",
        },
    }
}

/// Accepted loan purposes, in tie-break order for keyword matching.
pub const LOAN_PURPOSES: [&str; 6] =
    ["home purchase", "business", "education", "debt consolidation", "personal", "other"];

/// Accepted employment statuses: matching phrase paired with the stored value.
pub const EMPLOYMENT_STATUSES: [(&str, &str); 5] = [
    ("full-time", "Full-time"),
    ("part-time", "Part-time"),
    ("self-employed", "Self-employed"),
    ("unemployed", "Unemployed"),
    ("retired", "Retired"),
];

#[cfg(test)]
mod tests {
    use super::{descriptor, FieldKind, FieldName, FieldValue};

    #[test]
    fn every_field_has_a_descriptor_with_a_label() {
        for field in FieldName::ALL {
            let descriptor = descriptor(field);
            assert!(!descriptor.label.is_empty(), "{field:?} should carry a label");
            assert!(!descriptor.help_text.is_empty(), "{field:?} should carry help text");
        }
    }

    #[test]
    fn field_names_round_trip_through_wire_form() {
        for field in FieldName::ALL {
            let parsed = field.as_str().parse::<FieldName>().expect("wire name should parse");
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn field_name_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!("LOANAMOUNT".parse::<FieldName>(), Ok(FieldName::LoanAmount));
        assert!("favoriteColor".parse::<FieldName>().is_err());
    }

    #[test]
    fn collateral_type_depends_on_has_collateral() {
        let descriptor = descriptor(FieldName::CollateralType);
        let dependency = descriptor.depends_on.expect("collateral type is conditional");
        assert_eq!(dependency.field, FieldName::HasCollateral);
        assert_eq!(dependency.value, FieldValue::Bool(true));
        assert!(!descriptor.required);
    }

    #[test]
    fn empty_values_are_detected_per_variant() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("x").is_empty());
        assert!(!FieldValue::Number(0).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn boolean_field_uses_boolean_kind() {
        assert_eq!(descriptor(FieldName::HasCollateral).kind, FieldKind::Boolean);
    }
}
