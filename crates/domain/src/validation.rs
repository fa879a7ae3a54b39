//! Field validation helpers shared by the entity validators.

use crate::error::FieldViolations;

/// Maximum length, in characters, of bounded text fields.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Records a violation if `value` is empty after trimming.
pub fn require_non_blank(violations: &mut FieldViolations, value: &str, field_name: &str) {
    if value.trim().is_empty() {
        violations.push(format!("{field_name} cannot be blank"));
    }
}

/// Records a violation if `value` is longer than `max` characters.
pub fn require_max_length(
    violations: &mut FieldViolations,
    value: &str,
    max: usize,
    field_name: &str,
) {
    if value.chars().count() > max {
        violations.push(format!(
            "{field_name} cannot be more than {max} characters long"
        ));
    }
}

/// Records a violation if a required value is absent.
pub fn require_present<T: Copy>(
    violations: &mut FieldViolations,
    value: Option<T>,
    field_name: &str,
) -> Option<T> {
    if value.is_none() {
        violations.push(format!("{field_name} cannot be null"));
    }
    value
}

/// Non-blank and at most [`MAX_TEXT_LENGTH`] characters.
pub fn require_bounded_text(violations: &mut FieldViolations, value: &str, field_name: &str) {
    require_non_blank(violations, value, field_name);
    require_max_length(violations, value, MAX_TEXT_LENGTH, field_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_blank() {
        let mut violations = FieldViolations::new();
        require_non_blank(&mut violations, "   \t", "name");
        assert_eq!(violations.messages(), ["name cannot be blank"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut violations = FieldViolations::new();
        let accented = "é".repeat(MAX_TEXT_LENGTH);
        require_max_length(&mut violations, &accented, MAX_TEXT_LENGTH, "climate");
        assert!(violations.is_empty());

        require_max_length(&mut violations, &format!("{accented}x"), MAX_TEXT_LENGTH, "climate");
        assert_eq!(
            violations.messages(),
            ["climate cannot be more than 255 characters long"]
        );
    }

    #[test]
    fn absent_value_is_reported() {
        let mut violations = FieldViolations::new();
        assert_eq!(require_present::<i64>(&mut violations, None, "population"), None);
        assert_eq!(violations.messages(), ["population cannot be null"]);
    }
}
