//! Server address and credentials.

use crate::error::ClientError;
use std::fmt;

/// Environment variable holding the server base URL
pub const URL_VAR: &str = "ARTIFACTORY_URL";

/// Environment variable holding the user name
pub const USERNAME_VAR: &str = "ARTIFACTORY_USERNAME";

/// Environment variable holding the password or API key
pub const PASSWORD_VAR: &str = "ARTIFACTORY_PASSWORD";

/// Connection settings for one server
///
/// Passed explicitly into [`crate::ArtifactoryClient::new`]; nothing is read
/// from process-wide state after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    base_url: String,
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    ///
    /// A trailing `/` or `/api` on the URL is dropped; API calls add `/api`
    /// back and artifact URLs are built from the bare base.
    pub fn new(base_url: &str, username: impl Into<String>, password: impl Into<String>) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = trimmed.strip_suffix("/api").unwrap_or(trimmed).to_string();
        Self {
            base_url,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read `ARTIFACTORY_URL`, `ARTIFACTORY_USERNAME` and `ARTIFACTORY_PASSWORD`
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the three settings through `lookup`; a missing or empty value is an error
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ClientError::MissingEnvironmentVariable(name.to_string()))
        };

        let url = require(URL_VAR)?;
        let username = require(USERNAME_VAR)?;
        let password = require(PASSWORD_VAR)?;
        Ok(Self::new(&url, username, password))
    }

    /// Server base URL, without `/api`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// REST API root
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// User name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password or API key
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_api_suffix_normalized() {
        let plain = Credentials::new("https://artifactory.example.com/artifactory/", "u", "p");
        let with_api = Credentials::new("https://artifactory.example.com/artifactory/api", "u", "p");

        assert_eq!(plain.base_url(), "https://artifactory.example.com/artifactory");
        assert_eq!(plain, with_api);
        assert_eq!(plain.api_url(), "https://artifactory.example.com/artifactory/api");
    }

    #[test]
    fn test_from_lookup() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (URL_VAR, "http://localhost:8081/artifactory"),
            (USERNAME_VAR, "admin"),
            (PASSWORD_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password(), "secret");
    }

    #[test]
    fn test_missing_variable() {
        let result = Credentials::from_lookup(lookup_from(&[
            (URL_VAR, "http://localhost:8081/artifactory"),
            (PASSWORD_VAR, "secret"),
        ]));

        match result {
            Err(ClientError::MissingEnvironmentVariable(name)) => assert_eq!(name, USERNAME_VAR),
            other => panic!("Expected missing variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_variable_counts_as_missing() {
        let result = Credentials::from_lookup(lookup_from(&[
            (URL_VAR, ""),
            (USERNAME_VAR, "admin"),
            (PASSWORD_VAR, "secret"),
        ]));
        assert!(matches!(result, Err(ClientError::MissingEnvironmentVariable(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("http://localhost", "admin", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
