pub mod validation;

pub use validation::{validate_login, validate_reset, validate_signup, FormErrors, FormField, SignupForm};
