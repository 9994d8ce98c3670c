//! Canned bot copy: the greeting, per-field explanations, and the
//! help/fallback responses.

use intake_core::FieldName;

pub const GREETING: &str =
    "Hello! I'm here to help you with your loan application. What would you like to know?";

pub fn greeting_reply() -> &'static str {
    "Hello! How can I assist you with your loan application today? \
     You can ask me about any field in the form or how to fill it out."
}

pub fn help_reply() -> &'static str {
    "I can help you with filling out the loan application. You can ask me about any field like:\n\
     - Full Name\n- Email\n- Credit Score\n- Loan Amount\n- Monthly Income\n\
     - Employment Status\n- Collateral\n- Loan Purpose\n\nWhat would you like to know about?"
}

pub fn fallback_reply() -> &'static str {
    "I can help you with any part of the loan application. You can ask about specific fields \
     like loan amount, credit score, employment, or collateral. What would you like to know?"
}

/// Explanation lookup order for the intercept; earlier entries win when an
/// utterance names several fields.
pub const EXPLAINABLE: [FieldName; 8] = [
    FieldName::FullName,
    FieldName::Email,
    FieldName::CreditScore,
    FieldName::LoanAmount,
    FieldName::MonthlyIncome,
    FieldName::HasCollateral,
    FieldName::EmploymentStatus,
    FieldName::LoanPurpose,
];

/// Canned explanation ending in the question that re-prompts the field.
/// Fields outside [`EXPLAINABLE`] have no canned text.
pub fn explanation(field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::FullName => Some(
            "Your full legal name as it appears on official documents. What's your full name?",
        ),
        FieldName::Email => Some(
            "Your primary email address for communications about your loan application. \
             What's your email address?",
        ),
        FieldName::CreditScore => Some(
            "A credit score is a number between 300-850 that depicts your creditworthiness. \
             The higher your score, the better your chances of loan approval. \
             What's your credit score?",
        ),
        FieldName::LoanAmount => Some(
            "The loan amount is the total sum you'd like to borrow. We offer loans between \
             $1,000 and $1,000,000. How much would you like to borrow?",
        ),
        FieldName::MonthlyIncome => Some(
            "Monthly income is your total earnings per month before taxes. This helps us \
             determine your loan repayment capacity. What's your monthly income?",
        ),
        FieldName::HasCollateral => Some(
            "Collateral is an asset (like a house or car) that you pledge against your loan. \
             It provides security to the lender. Do you have any assets to offer as collateral?",
        ),
        FieldName::EmploymentStatus => Some(
            "Employment status indicates your current work situation. Are you employed \
             full-time, part-time, self-employed, or in a different situation?",
        ),
        FieldName::LoanPurpose => Some(
            "The loan purpose helps us understand how you plan to use the funds. Common \
             purposes include home purchase, business, education, or debt consolidation. \
             What's your loan purpose?",
        ),
        FieldName::CollateralType | FieldName::AdditionalNotes => None,
    }
}
