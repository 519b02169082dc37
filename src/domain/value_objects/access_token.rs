use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer 認証に使うアクセストークン。`Debug` では値を伏せる。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: String) -> Result<Self, String> {
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err("Access token cannot be empty".to_string());
        }
        if value.chars().any(char::is_whitespace) {
            return Err("Access token cannot contain whitespace".to_string());
        }
        Ok(())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl TryFrom<String> for AccessToken {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_tokens() {
        assert!(AccessToken::new(String::new()).is_err());
        assert!(AccessToken::new("   ".into()).is_err());
        assert!(AccessToken::new("abc def".into()).is_err());
    }

    #[test]
    fn debug_output_hides_value() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.secret".into()).unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.as_str(), "eyJhbGciOiJIUzI1NiJ9.secret");
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<AccessToken>(r#""""#).is_err());
        let token: AccessToken = serde_json::from_str(r#""tok""#).unwrap();
        assert_eq!(token.as_str(), "tok");
    }
}
