use intake_core::{descriptor, FieldKind, FieldName, FieldValue};

/// Renders the static field schema, one line per field in declared order.
pub fn run() -> String {
    let mut lines = vec!["intake field schema (declared order):".to_string()];

    for field in FieldName::ALL {
        let descriptor = descriptor(field);
        let mut line = format!(
            "- {} ({}{}) — {}",
            field.as_str(),
            kind_name(descriptor.kind),
            if descriptor.required { ", required" } else { "" },
            descriptor.help_text
        );
        if let Some(dependency) = descriptor.depends_on {
            line.push_str(&format!(
                " [only when {} = {}]",
                dependency.field.as_str(),
                render_value(&dependency.value)
            ));
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Empty => "<empty>".to_string(),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Number(number) => number.to_string(),
        FieldValue::Bool(boolean) => boolean.to_string(),
    }
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Number => "number",
        FieldKind::Select => "select",
        FieldKind::Boolean => "boolean",
        FieldKind::TextArea => "textarea",
    }
}
