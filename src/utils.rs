use crate::types::FieldErrors;

pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";

pub fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Records an error when `value` is empty after trimming.
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        push_error(errors, field, BLANK);
    }
}

pub fn does_not_exist(pk: &str) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}
