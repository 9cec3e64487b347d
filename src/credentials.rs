//! API key handling
//!
//! [`ApiKey`] never prints its value; [`ApiKey::expose`] is called only where
//! the `Authorization` header is built.

use std::fmt;

const REDACTED: &str = "**********";

/// Environment variable holding the partner API key
pub const API_KEY_ENV: &str = "ULTRAHUMAN_API_KEY";

/// Opaque partner API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&REDACTED).finish()
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Source of the partner API key
pub trait CredentialSource {
    fn api_key(&self) -> Option<ApiKey>;
}

impl CredentialSource for ApiKey {
    fn api_key(&self) -> Option<ApiKey> {
        Some(self.clone())
    }
}

/// Reads the key from an environment variable, after loading `.env` if present
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
    load_dotenv: bool,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self {
            var: API_KEY_ENV.to_string(),
            load_dotenv: true,
        }
    }
}

impl EnvCredentials {
    /// Read from `var` instead of `ULTRAHUMAN_API_KEY`
    pub fn with_var(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            ..Self::default()
        }
    }

    /// Skip loading the `.env` file
    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<ApiKey> {
        if self.load_dotenv {
            dotenvy::dotenv().ok();
        }
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.is_empty())
            .map(ApiKey::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("test-api-key-12345");
        assert_eq!(key.to_string(), REDACTED);
        assert!(!format!("{key:?}").contains("test-api-key"));
        assert_eq!(key.expose(), "test-api-key-12345");
    }

    #[test]
    fn test_api_key_is_its_own_source() {
        let key = ApiKey::new("abc");
        assert_eq!(key.api_key(), Some(key));
    }

    #[test]
    fn test_env_credentials() {
        let var = "UH_CLIENT_TEST_ENV_CREDENTIALS";
        std::env::set_var(var, "env-api-key-123");
        let source = EnvCredentials::with_var(var).without_dotenv();
        assert_eq!(source.api_key().unwrap().expose(), "env-api-key-123");
        std::env::remove_var(var);
        assert_eq!(source.api_key(), None);
    }

    #[test]
    fn test_env_credentials_ignore_empty_value() {
        let var = "UH_CLIENT_TEST_EMPTY_KEY";
        std::env::set_var(var, "");
        assert_eq!(EnvCredentials::with_var(var).without_dotenv().api_key(), None);
        std::env::remove_var(var);
    }
}
