use std::io::{self, BufRead, Write};

use anyhow::Result;
use intake_core::{descriptor, FieldKind, FieldName, FieldValue};
use intake_engine::IntakeSession;

const USAGE: &str = "Slash commands:\n  /set <field> <value>  edit a form field directly\n  /form                 show the record and current errors\n  /submit               validate the whole application\n  /help                 show this help\n  /quit                 leave the session\nAnything else is sent to the assistant.";

/// Interactive intake session: chat lines go through the dialogue engine,
/// slash commands act on the form surface directly.
pub fn run() -> Result<()> {
    let mut session = IntakeSession::new();
    println!("bot> {}", session.last_reply().unwrap_or_default());
    println!("{USAGE}");

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match dispatch_line(&mut session, line.trim()) {
            Dispatch::Reply(reply) => println!("{reply}"),
            Dispatch::Silent => {}
            Dispatch::Quit => break,
        }
    }

    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Reply(String),
    Silent,
    Quit,
}

/// Routes one input line. Pure with respect to I/O so it can be tested
/// without a terminal.
pub fn dispatch_line(session: &mut IntakeSession, line: &str) -> Dispatch {
    if line.is_empty() {
        return Dispatch::Silent;
    }

    if let Some(command) = line.strip_prefix('/') {
        return dispatch_command(session, command);
    }

    session.process_utterance(line);
    Dispatch::Reply(format!("bot> {}", session.last_reply().unwrap_or_default()))
}

fn dispatch_command(session: &mut IntakeSession, command: &str) -> Dispatch {
    let mut parts = command.splitn(3, char::is_whitespace);
    let name = parts.next().unwrap_or_default();

    match name {
        "quit" | "exit" => Dispatch::Quit,
        "help" => Dispatch::Reply(USAGE.to_string()),
        "form" => Dispatch::Reply(render_form(session)),
        "submit" => Dispatch::Reply(render_submission(session)),
        "set" => {
            let field = parts.next().unwrap_or_default();
            let raw_value = parts.next().unwrap_or_default();
            Dispatch::Reply(set_field(session, field, raw_value))
        }
        other => Dispatch::Reply(format!("unknown command `/{other}` (try /help)")),
    }
}

fn render_form(session: &IntakeSession) -> String {
    serde_json::to_string_pretty(session.form())
        .unwrap_or_else(|error| format!("could not render form: {error}"))
}

fn render_submission(session: &mut IntakeSession) -> String {
    let failures = session.validate_all();
    if failures.is_empty() {
        return "Application submitted successfully!".to_string();
    }

    let mut lines =
        vec!["Please fill in all required fields correctly before submitting.".to_string()];
    for failure in failures {
        lines.push(format!("- {}: {}", failure.field.label(), failure.message));
    }
    lines.join("\n")
}

fn set_field(session: &mut IntakeSession, field: &str, raw_value: &str) -> String {
    let field = match field.parse::<FieldName>() {
        Ok(field) => field,
        Err(error) => return error.to_string(),
    };

    let value = match parse_value(descriptor(field).kind, raw_value) {
        Ok(value) => value,
        Err(message) => return message,
    };

    session.update_field(field, value);
    match session.form().error(field) {
        Some(message) => format!("{} updated with a warning: {message}", field.as_str()),
        None => format!("{} updated", field.as_str()),
    }
}

/// Kind-aware parse of a raw form input. An empty input clears the field.
fn parse_value(kind: FieldKind, raw: &str) -> Result<FieldValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Empty);
    }

    match kind {
        FieldKind::Number => trimmed
            .parse::<i64>()
            .map(FieldValue::Number)
            .map_err(|_| format!("expected a whole number, got `{trimmed}`")),
        FieldKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" => Ok(FieldValue::Bool(true)),
            "false" | "no" | "n" => Ok(FieldValue::Bool(false)),
            other => Err(format!("expected yes/no, got `{other}`")),
        },
        FieldKind::Text | FieldKind::Email | FieldKind::Select | FieldKind::TextArea => {
            Ok(FieldValue::text(trimmed))
        }
    }
}

#[cfg(test)]
mod tests {
    use intake_core::{FieldKind, FieldName, FieldValue};
    use intake_engine::IntakeSession;

    use super::{dispatch_line, parse_value, Dispatch};

    #[test]
    fn plain_lines_go_through_the_dialogue_engine() {
        let mut session = IntakeSession::new();
        let reply = dispatch_line(&mut session, "what's a credit score?");

        assert!(matches!(reply, Dispatch::Reply(ref text) if text.contains("300-850")));
        assert_eq!(session.cursor(), Some(FieldName::CreditScore));
    }

    #[test]
    fn set_command_edits_the_form_and_reports_validation() {
        let mut session = IntakeSession::new();

        let ok = dispatch_line(&mut session, "/set loanAmount 50000");
        assert_eq!(ok, Dispatch::Reply("loanAmount updated".to_string()));
        assert_eq!(session.form().value(FieldName::LoanAmount), &FieldValue::Number(50_000));

        let flagged = dispatch_line(&mut session, "/set creditScore 900");
        assert!(matches!(flagged, Dispatch::Reply(ref text) if text.contains("warning")));
        assert_eq!(session.form().value(FieldName::CreditScore), &FieldValue::Number(900));
    }

    #[test]
    fn set_command_rejects_unknown_fields_and_bad_values() {
        let mut session = IntakeSession::new();

        let unknown = dispatch_line(&mut session, "/set favoriteColor blue");
        assert!(matches!(unknown, Dispatch::Reply(ref text) if text.contains("favoriteColor")));

        let bad = dispatch_line(&mut session, "/set loanAmount lots");
        assert!(matches!(bad, Dispatch::Reply(ref text) if text.contains("whole number")));
        assert_eq!(session.form().value(FieldName::LoanAmount), &FieldValue::Empty);
    }

    #[test]
    fn submit_blocks_with_a_generic_notice_until_valid() {
        let mut session = IntakeSession::new();
        let blocked = dispatch_line(&mut session, "/submit");
        let Dispatch::Reply(notice) = blocked else {
            panic!("expected a reply");
        };
        assert!(notice.starts_with("Please fill in all required fields"));
        assert!(notice.contains("Email Address"));
    }

    #[test]
    fn quit_and_unknown_commands_are_recognized() {
        let mut session = IntakeSession::new();
        assert_eq!(dispatch_line(&mut session, "/quit"), Dispatch::Quit);
        assert!(matches!(
            dispatch_line(&mut session, "/frobnicate"),
            Dispatch::Reply(ref text) if text.contains("unknown command")
        ));
        assert_eq!(dispatch_line(&mut session, ""), Dispatch::Silent);
    }

    #[test]
    fn value_parsing_follows_the_field_kind() {
        assert_eq!(parse_value(FieldKind::Number, " 42 "), Ok(FieldValue::Number(42)));
        assert_eq!(parse_value(FieldKind::Boolean, "yes"), Ok(FieldValue::Bool(true)));
        assert_eq!(parse_value(FieldKind::Text, "a house"), Ok(FieldValue::text("a house")));
        assert_eq!(parse_value(FieldKind::Email, ""), Ok(FieldValue::Empty));
        assert!(parse_value(FieldKind::Boolean, "perhaps").is_err());
    }
}
