use serde_json::Value;

use crate::error::ApiError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 255;
pub const PASSWORD_MIN: usize = 8;

/// A registration or login payload after validation. The username is
/// trimmed; the password is kept verbatim.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Checks a raw request payload and produces a normalized credential pair.
///
/// Every handler that accepts credentials goes through this one function,
/// so the length and type rules cannot drift between register and login.
/// Pure function of its input.
pub fn credentials(payload: &Value) -> Result<Credentials, ApiError> {
    let username = string_field(payload, "username")?.trim().to_owned();
    let password = string_field(payload, "password")?.to_owned();

    let len = username.chars().count();
    if len < USERNAME_MIN {
        return Err(ApiError::Validation(format!(
            "username must be at least {USERNAME_MIN} characters"
        )));
    }
    if len > USERNAME_MAX {
        return Err(ApiError::Validation(format!(
            "username must be at most {USERNAME_MAX} characters"
        )));
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(ApiError::Validation(format!(
            "password must be at least {PASSWORD_MIN} characters"
        )));
    }

    Ok(Credentials { username, password })
}

fn string_field<'a>(payload: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    match payload.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        Some(Value::String(_)) => {
            Err(ApiError::Validation(format!("{field} must not be empty")))
        }
        Some(_) => Err(ApiError::Validation(format!("{field} must be a string"))),
        None => Err(ApiError::Validation(format!(
            "missing required field: {field}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expect_validation(payload: serde_json::Value) -> String {
        match credentials(&payload) {
            Err(ApiError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_credentials_and_trims_username() {
        let creds = credentials(&json!({
            "username": "  alice123  ",
            "password": "correcthorse",
        }))
        .expect("valid payload");
        assert_eq!(creds.username, "alice123");
        assert_eq!(creds.password, "correcthorse");
    }

    #[test]
    fn rejects_missing_fields() {
        let msg = expect_validation(json!({ "password": "correcthorse" }));
        assert!(msg.contains("username"));
        let msg = expect_validation(json!({ "username": "alice123" }));
        assert!(msg.contains("password"));
    }

    #[test]
    fn rejects_non_string_fields() {
        let msg = expect_validation(json!({ "username": 42, "password": "correcthorse" }));
        assert!(msg.contains("must be a string"));
        let msg = expect_validation(json!({ "username": "alice123", "password": null }));
        assert!(msg.contains("must be a string"));
    }

    #[test]
    fn rejects_whitespace_only_values() {
        let msg = expect_validation(json!({ "username": "   ", "password": "correcthorse" }));
        assert!(msg.contains("username"));
    }

    #[test]
    fn rejects_short_username() {
        let msg = expect_validation(json!({ "username": "ab", "password": "correcthorse" }));
        assert!(msg.contains("at least 3"));
    }

    #[test]
    fn rejects_overlong_username() {
        let long = "x".repeat(USERNAME_MAX + 1);
        let msg = expect_validation(json!({ "username": long, "password": "correcthorse" }));
        assert!(msg.contains("at most"));
    }

    #[test]
    fn accepts_username_at_both_bounds() {
        for name in ["abc".to_string(), "x".repeat(USERNAME_MAX)] {
            credentials(&json!({ "username": name, "password": "correcthorse" }))
                .expect("boundary length should pass");
        }
    }

    #[test]
    fn rejects_short_password() {
        let msg = expect_validation(json!({ "username": "alice123", "password": "short" }));
        assert!(msg.contains("at least 8"));
    }
}
