//! Identity provider error codes and their user-facing messages.

use std::fmt;

/// Normalised identity error, named after the provider SDK codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    InvalidEmail,
    OperationNotAllowed,
    WeakPassword,
    UserDisabled,
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    TooManyRequests,
    NetworkRequestFailed,
    RequiresRecentLogin,
    NoCurrentUser,
    /// Anything else, with the provider's raw message.
    Unknown(String),
}

impl AuthErrorCode {
    /// Map a REST error message (`EMAIL_EXISTS`, `WEAK_PASSWORD : Password should be...`).
    pub fn from_rest_message(message: &str) -> Self {
        let key = message
            .split(':')
            .next()
            .unwrap_or(message)
            .trim();

        match key {
            "EMAIL_EXISTS" => AuthErrorCode::EmailAlreadyInUse,
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthErrorCode::InvalidEmail,
            "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => AuthErrorCode::OperationNotAllowed,
            "WEAK_PASSWORD" => AuthErrorCode::WeakPassword,
            "USER_DISABLED" => AuthErrorCode::UserDisabled,
            "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => AuthErrorCode::UserNotFound,
            "INVALID_PASSWORD" => AuthErrorCode::WrongPassword,
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" => {
                AuthErrorCode::InvalidCredential
            }
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorCode::TooManyRequests,
            "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" | "TOKEN_EXPIRED" => AuthErrorCode::RequiresRecentLogin,
            _ => AuthErrorCode::Unknown(message.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::OperationNotAllowed => "auth/operation-not-allowed",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::UserDisabled => "auth/user-disabled",
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::NetworkRequestFailed => "auth/network-request-failed",
            AuthErrorCode::RequiresRecentLogin => "auth/requires-recent-login",
            AuthErrorCode::NoCurrentUser => "auth/no-current-user",
            AuthErrorCode::Unknown(_) => "auth/unknown",
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => "This email is already in use",
            AuthErrorCode::InvalidEmail => "Invalid email",
            AuthErrorCode::OperationNotAllowed => "Operation not allowed",
            AuthErrorCode::WeakPassword => "Password too weak (minimum 6 characters)",
            AuthErrorCode::UserDisabled => "This account has been disabled",
            AuthErrorCode::UserNotFound => "No account found with this email",
            AuthErrorCode::WrongPassword => "Incorrect password",
            AuthErrorCode::InvalidCredential => "Invalid credentials",
            AuthErrorCode::TooManyRequests => "Too many attempts. Try again later",
            AuthErrorCode::NetworkRequestFailed => "Network error. Check your connection",
            AuthErrorCode::RequiresRecentLogin => "This action requires signing in again",
            AuthErrorCode::NoCurrentUser => "No user signed in",
            AuthErrorCode::Unknown(message) if !message.trim().is_empty() => message,
            AuthErrorCode::Unknown(_) => crate::core::error::GENERIC_ERROR,
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_messages_map_to_codes() {
        assert_eq!(AuthErrorCode::from_rest_message("EMAIL_EXISTS"), AuthErrorCode::EmailAlreadyInUse);
        assert_eq!(
            AuthErrorCode::from_rest_message("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthErrorCode::WeakPassword
        );
        assert_eq!(AuthErrorCode::from_rest_message("EMAIL_NOT_FOUND"), AuthErrorCode::UserNotFound);
        assert_eq!(
            AuthErrorCode::from_rest_message("INVALID_LOGIN_CREDENTIALS"),
            AuthErrorCode::InvalidCredential
        );
        assert_eq!(
            AuthErrorCode::from_rest_message("CREDENTIAL_TOO_OLD_LOGIN_AGAIN"),
            AuthErrorCode::RequiresRecentLogin
        );
    }

    #[test]
    fn test_unknown_falls_back_to_provider_message() {
        let code = AuthErrorCode::from_rest_message("QUOTA_EXCEEDED");
        assert_eq!(code.user_message(), "QUOTA_EXCEEDED");
        assert_eq!(AuthErrorCode::Unknown(String::new()).user_message(), "An error occurred");
    }
}
