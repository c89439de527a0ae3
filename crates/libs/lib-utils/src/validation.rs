//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Loose email check equivalent to the unanchored pattern `\S+@\S+\.\S+`.
///
/// Some `@` must have a non-whitespace character before it and, after it, a
/// run of non-whitespace characters containing a dot that is neither the first
/// nor the last character of the run.
pub fn looks_like_email(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();

    chars.iter().enumerate().any(|(at, &c)| {
        if c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }

        let domain: Vec<char> = chars[at + 1..]
            .iter()
            .copied()
            .take_while(|c| !c.is_whitespace())
            .collect();

        domain
            .iter()
            .enumerate()
            .any(|(i, &c)| c == '.' && i > 0 && i + 1 < domain.len())
    })
}

/// Validate minimum length, counted in characters.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}
