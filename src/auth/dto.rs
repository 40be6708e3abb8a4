use serde::Serialize;
use time::OffsetDateTime;

/// Response returned after registration. Only the username; never the hash.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of a user returned by the listing and profile endpoints.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_summary_serializes_created_at_as_rfc3339() {
        let summary = UserSummary {
            username: "alice123".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["username"], "alice123");
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }
}
