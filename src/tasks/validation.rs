use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::core::messages::{catalog, MessageCatalog};
use crate::tasks::types::{TaskDraft, TaskPayload, TaskStatus};

pub const TITLE_MAX: usize = 155;
pub const DESCRIPTION_MAX: usize = 255;

/// Per-field validation errors, keyed by the JSON field name. A BTreeMap
/// keeps the serialized order stable.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Validate a create/update payload against the task schema: title and
/// description required with length caps, status one of the closed enum,
/// due_date a real calendar date in `YYYY-MM-DD` form. All failing fields
/// are reported at once.
pub fn validate_task_payload(payload: &TaskPayload) -> Result<TaskDraft, FieldErrors> {
    let messages = catalog();
    let mut errors = FieldErrors::new();

    let title = required_text(&payload.title, "title", "título", TITLE_MAX, messages, &mut errors);
    let description = required_text(
        &payload.description,
        "description",
        "descripción",
        DESCRIPTION_MAX,
        messages,
        &mut errors,
    );

    let status = match payload.status.as_deref().map(str::trim) {
        None | Some("") => {
            push_error(
                &mut errors,
                "status",
                MessageCatalog::for_field(&messages.field_required, "estado"),
            );
            None
        }
        Some(raw) => match TaskStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                push_error(&mut errors, "status", messages.invalid_status.clone());
                None
            }
        },
    };

    let due_date = match payload.due_date.as_deref().map(str::trim) {
        None | Some("") => {
            push_error(
                &mut errors,
                "due_date",
                MessageCatalog::for_field(&messages.field_required, "fecha de vencimiento"),
            );
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                push_error(&mut errors, "due_date", messages.invalid_date.clone());
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All four are Some when no error was recorded.
    Ok(TaskDraft {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        status: status.unwrap_or_default(),
        due_date: due_date.unwrap_or_default(),
    })
}

fn required_text(
    value: &Option<String>,
    field: &str,
    display_name: &str,
    max: usize,
    messages: &MessageCatalog,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        None | Some("") => {
            push_error(
                errors,
                field,
                MessageCatalog::for_field(&messages.field_required, display_name),
            );
            None
        }
        Some(text) => {
            if text.chars().count() > max {
                push_error(
                    errors,
                    field,
                    MessageCatalog::for_field_max(&messages.field_max_length, display_name, max),
                );
                None
            } else {
                Some(text.to_string())
            }
        }
    }
}

fn push_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}
