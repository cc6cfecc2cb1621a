//! Wire DTOs for the auth and member REST endpoints.
//!
//! DESIGN
//! ======
//! Response shapes are pinned to the backend contract. The client never hunts
//! through nested fields for something that looks like a URL or token; a
//! response that does not match is a decode error.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Social identity providers offered on the login page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Kakao,
    Google,
}

impl Provider {
    pub const ALL: [Self; 2] = [Self::Kakao, Self::Google];

    /// Path segment used by `/api/v1/auth/{provider}`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Kakao => "kakao",
            Self::Google => "google",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kakao => "Continue with Kakao",
            Self::Google => "Continue with Google",
        }
    }
}

/// `GET /api/v1/auth/{provider}` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Tokens issued by the code exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The signed-in member as returned by `/api/v1/members/me/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    /// Member identifier. The backend sends either a number or a string.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) if !s.is_empty() => Ok(s),
        serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        _ => Err(D::Error::custom("expected non-empty string or integer id")),
    }
}
