//! Password strength policy.
//!
//! Registration requires a minimum of 8 characters with at least one
//! lowercase letter, one uppercase letter, one digit, and one symbol.
//! The policy lives in core so it can be validated without touching the
//! hashing layer.

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors describing why a password fails the strength policy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
    /// No lowercase letter.
    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,
    /// No uppercase letter.
    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,
    /// No digit.
    #[error("password must contain at least one digit")]
    MissingDigit,
    /// No symbol (non-alphanumeric character).
    #[error("password must contain at least one symbol")]
    MissingSymbol,
}

/// Validate a candidate password against the strength policy.
///
/// # Errors
///
/// Returns the first policy rule the password violates, checked in order:
/// length, lowercase, uppercase, digit, symbol.
pub fn validate_password_strength(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(PasswordPolicyError::MissingSymbol);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password_strength("Str0ng!pass").is_ok());
        assert!(validate_password_strength("aB3$efgh").is_ok());
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            validate_password_strength("aB3$efg"),
            Err(PasswordPolicyError::TooShort)
        );
    }

    #[test]
    fn test_missing_lowercase() {
        assert_eq!(
            validate_password_strength("AB3$EFGH"),
            Err(PasswordPolicyError::MissingLowercase)
        );
    }

    #[test]
    fn test_missing_uppercase() {
        assert_eq!(
            validate_password_strength("ab3$efgh"),
            Err(PasswordPolicyError::MissingUppercase)
        );
    }

    #[test]
    fn test_missing_digit() {
        assert_eq!(
            validate_password_strength("abC$efgh"),
            Err(PasswordPolicyError::MissingDigit)
        );
    }

    #[test]
    fn test_missing_symbol() {
        assert_eq!(
            validate_password_strength("abC3efgh"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 8 multibyte chars with all required classes
        assert!(validate_password_strength("aB3$éfgh").is_ok());
    }
}
