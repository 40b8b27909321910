use serde::{Deserialize, Serialize};

use super::{null_as_default, string_or_number};

/// GET users/me/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub is_premium: bool,
}

/// GET user-stats/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_cvs: u32,
    #[serde(default)]
    pub successful_cvs: u32,
    #[serde(default)]
    pub today_count: u32,
    #[serde(default)]
    pub daily_limit: u32,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub remaining_today: u32,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration may or may not sign the user in straight away.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_accepts_integer_id() {
        let user: UserProfile =
            serde_json::from_str(r#"{ "id": 42, "username": "sara", "email": null }"#).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.email, "");
    }
}
