use serde::{Deserialize, Serialize};

/// Login/registration body. Fields are optional at the boundary so a
/// missing field turns into a 400 with the documented message instead of
/// a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn into_parts(self) -> Result<(String, String), String> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err("Username and password required".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
