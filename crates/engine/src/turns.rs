//! Turn classification: the pure state machine behind the dialogue engine.
//! Given the current cursor and an utterance, [`classify`] decides what the
//! session should do, without touching any state itself.

use intake_core::extract::{contains_any, extract_email, extract_number, match_keyword};
use intake_core::validate::{
    CREDIT_SCORE_MAX, CREDIT_SCORE_MIN, LOAN_AMOUNT_MAX, LOAN_AMOUNT_MIN,
};
use intake_core::{FieldName, FieldValue, EMPLOYMENT_STATUSES, LOAN_PURPOSES};

use crate::prompts::{explanation, EXPLAINABLE};

/// Fixed elicitation order for the guided sequence. Independent of the
/// schema's declared (rendering) order.
pub const ELICITATION_ORDER: [FieldName; 10] = [
    FieldName::FullName,
    FieldName::Email,
    FieldName::LoanAmount,
    FieldName::LoanPurpose,
    FieldName::CreditScore,
    FieldName::MonthlyIncome,
    FieldName::EmploymentStatus,
    FieldName::HasCollateral,
    FieldName::CollateralType,
    FieldName::AdditionalNotes,
];

/// Successor in the elicitation order; `None` past the terminal field.
pub fn next_field(field: FieldName) -> Option<FieldName> {
    let position = ELICITATION_ORDER.iter().position(|&candidate| candidate == field)?;
    ELICITATION_ORDER.get(position + 1).copied()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Emit the field's canned explanation and point the cursor at it.
    Explain { field: FieldName },
    /// Generic greeting response; cursor unchanged.
    Greet,
    /// Accept a value: persist it, emit the acknowledgment, move the cursor.
    Fill { field: FieldName, value: FieldValue, reply: String, next: Option<FieldName> },
    /// A value was recognized but refused; cursor held on the same field.
    Reject { reply: String },
    /// Field-list help response; cursor unchanged.
    Help,
    /// Nothing matched; generic nudge, cursor unchanged.
    Fallback,
}

const EXPLANATION_CUES: [&str; 4] = ["what is", "what's", "explain", "tell me about"];
const GREETING_PREFIXES: [&str; 3] = ["hi", "hello", "hey"];
const AFFIRMATIVE_CUES: [&str; 2] = ["yes", "have"];
const NEGATIVE_CUES: [&str; 2] = ["no", "don't"];

pub fn classify(cursor: Option<FieldName>, utterance: &str) -> TurnAction {
    let lowered = utterance.to_ascii_lowercase();

    // The explanation intercept outranks everything, including an active
    // elicitation: asking about another field re-aims the cursor at it.
    if contains_any(&lowered, &EXPLANATION_CUES) {
        if let Some(field) = named_explainable_field(&lowered) {
            return TurnAction::Explain { field };
        }
    }

    if GREETING_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix)) {
        return TurnAction::Greet;
    }

    if let Some(field) = cursor {
        if let Some(action) = handle_awaited_field(field, utterance, &lowered) {
            return action;
        }
        // No usable value and no field-specific complaint: fall through to
        // the help/fallback handling below, cursor held.
    }

    if contains_any(&lowered, &["help", "confused"]) {
        return TurnAction::Help;
    }

    TurnAction::Fallback
}

fn named_explainable_field(lowered: &str) -> Option<FieldName> {
    EXPLAINABLE.into_iter().find(|field| {
        explanation(*field).is_some()
            && (lowered.contains(&field.as_str().to_ascii_lowercase())
                || lowered.contains(field.spoken_name()))
    })
}

fn handle_awaited_field(field: FieldName, utterance: &str, lowered: &str) -> Option<TurnAction> {
    match field {
        FieldName::FullName => {
            plain_text_answer(utterance, 2)?;
            Some(fill(
                field,
                FieldValue::text(utterance),
                format!("Thank you, {utterance}. What's your email address?"),
            ))
        }
        FieldName::Email => match extract_email(utterance) {
            Some(email) => Some(fill(
                field,
                FieldValue::Text(email),
                "Thanks for providing your email. How much would you like to borrow?".to_string(),
            )),
            None => Some(TurnAction::Reject {
                reply: "That doesn't look like a valid email address. \
                        Please provide a valid email."
                    .to_string(),
            }),
        },
        FieldName::LoanAmount => {
            let amount = extract_number(utterance)?;
            if !(LOAN_AMOUNT_MIN..=LOAN_AMOUNT_MAX).contains(&amount) {
                return Some(TurnAction::Reject {
                    reply: "The loan amount must be between $1,000 and $1,000,000. \
                            Please provide a different amount."
                        .to_string(),
                });
            }
            Some(fill(
                field,
                FieldValue::Number(amount),
                format!(
                    "I've set your loan amount to ${}. What's the purpose of this loan?",
                    format_thousands(amount)
                ),
            ))
        }
        FieldName::LoanPurpose => {
            let purpose = match_keyword(lowered, &LOAN_PURPOSES)?;
            Some(fill(
                field,
                FieldValue::Text(capitalize_first(purpose)),
                format!("I've set your loan purpose to {purpose}. What's your credit score?"),
            ))
        }
        FieldName::CreditScore => {
            let score = extract_number(utterance)?;
            if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&score) {
                return Some(TurnAction::Reject {
                    reply: "Credit scores range from 300 to 850. \
                            Please provide a valid credit score."
                        .to_string(),
                });
            }
            Some(fill(
                field,
                FieldValue::Number(score),
                format!(
                    "I've recorded your credit score of {score}. \
                     Would you like to tell me about your monthly income?"
                ),
            ))
        }
        FieldName::MonthlyIncome => {
            let income = extract_number(utterance)?;
            Some(fill(
                field,
                FieldValue::Number(income),
                format!(
                    "Thank you for providing your monthly income of ${}. \
                     What's your employment status?",
                    format_thousands(income)
                ),
            ))
        }
        FieldName::EmploymentStatus => {
            let (_, stored) = EMPLOYMENT_STATUSES
                .into_iter()
                .find(|(phrase, _)| lowered.contains(phrase))?;
            Some(fill(
                field,
                FieldValue::text(stored),
                format!(
                    "I've noted that you're {}. Do you have any collateral to offer?",
                    stored.to_ascii_lowercase()
                ),
            ))
        }
        FieldName::HasCollateral => {
            if contains_any(lowered, &AFFIRMATIVE_CUES) {
                return Some(TurnAction::Fill {
                    field,
                    value: FieldValue::Bool(true),
                    reply: "Great! What type of collateral are you offering? This could be \
                            property, vehicles, or other valuable assets."
                        .to_string(),
                    next: Some(FieldName::CollateralType),
                });
            }
            if contains_any(lowered, &NEGATIVE_CUES) {
                // A negative answer skips the conditional collateralType field.
                return Some(TurnAction::Fill {
                    field,
                    value: FieldValue::Bool(false),
                    reply: "I understand you don't have collateral. Would you like to add \
                            any additional notes to your application?"
                        .to_string(),
                    next: Some(FieldName::AdditionalNotes),
                });
            }
            None
        }
        FieldName::CollateralType => {
            plain_text_answer(utterance, 1)?;
            Some(fill(
                field,
                FieldValue::text(utterance),
                "Thank you for providing your collateral information. Would you like to add \
                 any additional notes to your application?"
                    .to_string(),
            ))
        }
        FieldName::AdditionalNotes => {
            plain_text_answer(utterance, 1)?;
            Some(fill(
                field,
                FieldValue::text(utterance),
                "I've added your notes to the application. You can now review and submit \
                 your application using the form. Is there anything else you'd like to know?"
                    .to_string(),
            ))
        }
    }
}

fn fill(field: FieldName, value: FieldValue, reply: String) -> TurnAction {
    TurnAction::Fill { field, value, reply, next: next_field(field) }
}

/// Free-text answers are taken verbatim when long enough and not themselves
/// a question.
fn plain_text_answer(utterance: &str, min_length: usize) -> Option<()> {
    (utterance.len() >= min_length && !utterance.contains('?')).then_some(())
}

fn capitalize_first(text: &str) -> String {
    let mut characters = text.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().collect::<String>() + characters.as_str(),
        None => String::new(),
    }
}

fn format_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(character);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use intake_core::{FieldName, FieldValue};

    use super::{classify, format_thousands, next_field, TurnAction, ELICITATION_ORDER};

    #[test]
    fn elicitation_order_covers_every_field_and_terminates() {
        assert_eq!(ELICITATION_ORDER.len(), FieldName::ALL.len());
        assert_eq!(next_field(FieldName::FullName), Some(FieldName::Email));
        assert_eq!(next_field(FieldName::LoanAmount), Some(FieldName::LoanPurpose));
        assert_eq!(next_field(FieldName::AdditionalNotes), None);
    }

    #[test]
    fn explanation_intercept_overrides_active_cursor() {
        let action = classify(Some(FieldName::MonthlyIncome), "what's a credit score?");
        assert_eq!(action, TurnAction::Explain { field: FieldName::CreditScore });
    }

    #[test]
    fn explanation_matches_spoken_and_wire_names() {
        assert_eq!(
            classify(None, "tell me about the loan amount"),
            TurnAction::Explain { field: FieldName::LoanAmount }
        );
        assert_eq!(
            classify(None, "explain loanPurpose to me"),
            TurnAction::Explain { field: FieldName::LoanPurpose }
        );
    }

    #[test]
    fn explanation_cue_without_a_known_field_falls_through() {
        assert_eq!(classify(None, "what is the meaning of life"), TurnAction::Fallback);
    }

    #[test]
    fn greetings_are_answered_without_moving_the_cursor() {
        assert_eq!(classify(None, "Hello there"), TurnAction::Greet);
        assert_eq!(classify(Some(FieldName::Email), "hey"), TurnAction::Greet);
    }

    #[test]
    fn in_range_loan_amount_is_accepted_with_formatted_ack() {
        let action = classify(Some(FieldName::LoanAmount), "I'd like $50,000 please");
        let TurnAction::Fill { field, value, reply, next } = action else {
            panic!("expected a fill, got {action:?}");
        };
        assert_eq!(field, FieldName::LoanAmount);
        assert_eq!(value, FieldValue::Number(50_000));
        assert!(reply.contains("$50,000"));
        assert_eq!(next, Some(FieldName::LoanPurpose));
    }

    #[test]
    fn out_of_range_loan_amount_is_rejected_and_cursor_held() {
        let action = classify(Some(FieldName::LoanAmount), "I'd like to borrow $500");
        let TurnAction::Reject { reply } = action else {
            panic!("expected a rejection, got {action:?}");
        };
        assert!(reply.contains("between $1,000 and $1,000,000"));
    }

    #[test]
    fn loan_amount_without_a_number_falls_through() {
        assert_eq!(classify(Some(FieldName::LoanAmount), "a fair bit"), TurnAction::Fallback);
    }

    #[test]
    fn invalid_email_gets_a_specific_rejection() {
        let action = classify(Some(FieldName::Email), "just message me");
        assert!(matches!(
            action,
            TurnAction::Reject { ref reply } if reply.contains("valid email")
        ));
    }

    #[test]
    fn email_is_extracted_from_surrounding_text() {
        let action = classify(Some(FieldName::Email), "reach me at a.b@example.co.uk please");
        assert!(matches!(
            action,
            TurnAction::Fill { value: FieldValue::Text(ref email), .. }
                if email == "a.b@example.co.uk"
        ));
    }

    #[test]
    fn credit_score_bounds_are_enforced_at_the_turn_level() {
        assert!(matches!(
            classify(Some(FieldName::CreditScore), "900"),
            TurnAction::Reject { .. }
        ));
        assert!(matches!(
            classify(Some(FieldName::CreditScore), "my score is 720"),
            TurnAction::Fill { value: FieldValue::Number(720), next: Some(FieldName::MonthlyIncome), .. }
        ));
    }

    #[test]
    fn loan_purpose_keyword_is_stored_capitalized() {
        let action = classify(Some(FieldName::LoanPurpose), "it's for debt consolidation");
        assert!(matches!(
            action,
            TurnAction::Fill { value: FieldValue::Text(ref purpose), .. }
                if purpose == "Debt consolidation"
        ));
    }

    #[test]
    fn employment_status_phrase_maps_to_canonical_value() {
        let action = classify(Some(FieldName::EmploymentStatus), "I'm self-employed these days");
        assert!(matches!(
            action,
            TurnAction::Fill { value: FieldValue::Text(ref status), next: Some(FieldName::HasCollateral), .. }
                if status == "Self-employed"
        ));
    }

    #[test]
    fn collateral_answers_branch_the_next_field() {
        let yes = classify(Some(FieldName::HasCollateral), "yes, my car");
        assert!(matches!(
            yes,
            TurnAction::Fill {
                value: FieldValue::Bool(true),
                next: Some(FieldName::CollateralType),
                ..
            }
        ));

        let no = classify(Some(FieldName::HasCollateral), "I don't own anything like that");
        assert!(matches!(
            no,
            TurnAction::Fill {
                value: FieldValue::Bool(false),
                next: Some(FieldName::AdditionalNotes),
                ..
            }
        ));

        assert_eq!(classify(Some(FieldName::HasCollateral), "maybe"), TurnAction::Fallback);
    }

    #[test]
    fn questions_are_not_taken_as_free_text_answers() {
        assert_eq!(
            classify(Some(FieldName::AdditionalNotes), "can I skip this part? I'm confused"),
            TurnAction::Help
        );
    }

    #[test]
    fn terminal_notes_fill_clears_the_cursor() {
        let action = classify(Some(FieldName::AdditionalNotes), "Repaying early if possible.");
        assert!(matches!(action, TurnAction::Fill { next: None, .. }));
    }

    #[test]
    fn help_and_fallback_apply_when_no_field_is_awaited() {
        assert_eq!(classify(None, "I'm so confused"), TurnAction::Help);
        assert_eq!(classify(None, "the weather is nice"), TurnAction::Fallback);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(45_000), "45,000");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
    }
}
