//! Bearer token handling
//!
//! The records API token is held in a `secrecy` container: zeroed on drop,
//! redacted in `Debug`, and only readable through `expose_secret()`. Serializing
//! a configuration writes a placeholder instead of the token.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

/// Placeholder written when a configuration holding a token is serialized
pub const REDACTED: &str = "[REDACTED]";

/// Token text kept inside a [`SecretString`]
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

/// Renders the raw token; only reachable through `expose_secret()`
impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretValue)
    }
}

pub type SecretString = Secret<SecretValue>;

/// Wrap a token read from configuration or the environment
///
/// ```rust
/// use medirecord::config::secret_string;
/// use secrecy::ExposeSecret;
///
/// let token = secret_string("api-token".to_string());
/// assert_eq!(token.expose_secret().to_string(), "api-token");
/// ```
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[derive(Serialize, Deserialize)]
    struct TokenHolder {
        api_token: SecretString,
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        assert!(!format!("{secret:?}").contains("sensitive-data"));
    }

    #[test]
    fn test_deserialize_keeps_token() {
        let holder: TokenHolder = serde_json::from_str(r#"{"api_token":"token-123"}"#).unwrap();
        assert_eq!(holder.api_token.expose_secret().to_string(), "token-123");
    }

    #[test]
    fn test_serialize_writes_placeholder() {
        let holder = TokenHolder {
            api_token: secret_string("token-123".to_string()),
        };

        let json = serde_json::to_string(&holder).unwrap();

        assert!(!json.contains("token-123"));
        assert_eq!(json, format!(r#"{{"api_token":"{REDACTED}"}}"#));
    }
}
