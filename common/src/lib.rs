use validator::ValidationErrors;

/// Joins every field error into one `"; "`-separated message.
///
/// Fields are visited in name order so the same payload always produces the same text.
/// Errors without a custom message fall back to `"<field> is invalid"`. Failures that only
/// exist inside nested structs or lists are reported generically.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let messages = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>();

    if messages.is_empty() {
        "Invalid request body".to_string()
    } else {
        messages.join("; ")
    }
}
