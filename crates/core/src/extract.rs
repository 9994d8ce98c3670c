//! Text extraction helpers for the dialogue engine. Every function here is
//! pure and total: absence of a match is `None`, never an error.

/// Pulls the first integer out of free text, ignoring currency symbols and
/// thousands separators. `"I have $45,000 saved"` yields `45000`. Decimals,
/// negatives, and any number past the first are ignored.
pub fn extract_number(text: &str) -> Option<i64> {
    let cleaned: String =
        text.chars().filter(|character| !matches!(character, '$' | ',')).collect();

    let mut digits = String::new();
    for character in cleaned.chars() {
        if character.is_ascii_digit() {
            digits.push(character);
        } else if !digits.is_empty() {
            break;
        }
    }

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Finds the first conservative `local@domain.tld` shape in free text.
pub fn extract_email(text: &str) -> Option<String> {
    let bytes = text.as_bytes();

    for (at_index, &byte) in bytes.iter().enumerate() {
        if byte != b'@' {
            continue;
        }

        let mut start = at_index;
        while start > 0 && is_local_byte(bytes[start - 1]) {
            start -= 1;
        }
        if start == at_index {
            continue;
        }

        let mut end = at_index + 1;
        while end < bytes.len() && is_domain_byte(bytes[end]) {
            end += 1;
        }

        let domain = &text[at_index + 1..end];
        if let Some(domain_length) = valid_domain_length(domain) {
            return Some(text[start..at_index + 1 + domain_length].to_string());
        }
    }

    None
}

/// Trims a candidate domain run to end at the rightmost `.tld` with at least
/// two trailing letters, mirroring how a greedy pattern would settle. Returns
/// the matched length within `domain`, or `None` when no dot qualifies.
fn valid_domain_length(domain: &str) -> Option<usize> {
    let bytes = domain.as_bytes();

    for (dot_index, &byte) in bytes.iter().enumerate().rev() {
        if byte != b'.' || dot_index == 0 {
            continue;
        }

        let mut run_end = dot_index + 1;
        while run_end < bytes.len() && bytes[run_end].is_ascii_alphabetic() {
            run_end += 1;
        }
        if run_end - dot_index - 1 >= 2 {
            return Some(run_end);
        }
    }

    None
}

fn is_local_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'%' | b'+' | b'-')
}

fn is_domain_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-')
}

/// Whole-string email check used by the field validator: one `@`, no
/// whitespace, and a dotted domain with something on both sides of the dot.
pub fn is_valid_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    if text.chars().filter(|&character| character == '@').count() != 1 {
        return false;
    }

    let Some((local, rest)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }

    let Some((domain, tld)) = rest.rsplit_once('.') else {
        return false;
    };
    !domain.is_empty() && !tld.is_empty()
}

/// Case-insensitive substring match against an ordered vocabulary. The first
/// entry whose phrase appears in the utterance wins.
pub fn match_keyword<'a>(text: &str, vocabulary: &[&'a str]) -> Option<&'a str> {
    let lowered = text.to_ascii_lowercase();
    vocabulary.iter().copied().find(|phrase| lowered.contains(phrase))
}

/// True when any of the cue phrases appears in the lowercased utterance.
pub fn contains_any(text: &str, cues: &[&str]) -> bool {
    let lowered = text.to_ascii_lowercase();
    cues.iter().any(|cue| lowered.contains(cue))
}

#[cfg(test)]
mod tests {
    use super::{contains_any, extract_email, extract_number, is_valid_email, match_keyword};

    #[test]
    fn extracts_first_number_with_currency_noise() {
        assert_eq!(extract_number("I have $45,000 saved"), Some(45_000));
        assert_eq!(extract_number("maybe 500 or 600"), Some(500));
        assert_eq!(extract_number("$1.5"), Some(1));
    }

    #[test]
    fn missing_numbers_are_a_normal_none() {
        assert_eq!(extract_number("no numbers here"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn extracts_dotted_email_from_surrounding_text() {
        assert_eq!(
            extract_email("reach me at a.b@example.co.uk please"),
            Some("a.b@example.co.uk".to_string())
        );
        assert_eq!(extract_email("mail: jo_doe+loans@bank.io."), Some("jo_doe+loans@bank.io".to_string()));
    }

    #[test]
    fn short_or_missing_domains_do_not_match() {
        assert_eq!(extract_email("nothing to see"), None);
        assert_eq!(extract_email("broken@"), None);
        assert_eq!(extract_email("user@host"), None);
        assert_eq!(extract_email("a@b.c"), None);
    }

    #[test]
    fn domain_settles_on_last_qualifying_dot() {
        assert_eq!(extract_email("ping x@b.co.u now"), Some("x@b.co".to_string()));
    }

    #[test]
    fn whole_string_email_validation_is_conservative() {
        assert!(is_valid_email("jane@bank.com"));
        assert!(is_valid_email("a.b@example.co.uk"));
        assert!(!is_valid_email("jane @bank.com"));
        assert!(!is_valid_email("jane@bank"));
        assert!(!is_valid_email("@bank.com"));
        assert!(!is_valid_email("jane@@bank.com"));
    }

    #[test]
    fn keyword_matching_is_case_insensitive_with_list_order_tie_break() {
        let vocabulary = ["home purchase", "business", "education"];
        assert_eq!(match_keyword("For my BUSINESS expansion", &vocabulary), Some("business"));
        assert_eq!(
            match_keyword("education for a business", &vocabulary),
            Some("business"),
            "earlier vocabulary entries win ties"
        );
        assert_eq!(match_keyword("a vacation", &vocabulary), None);
    }

    #[test]
    fn cue_detection_scans_lowercased_text() {
        assert!(contains_any("Yes, I DO have one", &["yes", "have"]));
        assert!(!contains_any("maybe later", &["yes", "have"]));
    }
}
