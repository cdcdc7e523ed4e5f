use std::env;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

use adminreports_core::{AppError, AppResult};
use url::Url;

/// Environment variable holding the OAuth access token.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLEWORKSPACE_ACCESS_TOKEN";
/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "GOOGLEWORKSPACE_REPORTS_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "GOOGLEWORKSPACE_REQUEST_TIMEOUT_SECS";
/// Environment variable holding the default customer id.
pub const CUSTOMER_ID_ENV: &str = "GOOGLEWORKSPACE_CUSTOMER_ID";

/// Public Admin SDK endpoint.
pub const DEFAULT_BASE_URL: &str = "https://admin.googleapis.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the Admin Reports HTTP client.
#[derive(Clone)]
pub struct AdminReportsConfig {
    /// API base URL; the `/admin/reports/v1` path is appended.
    pub base_url: Url,
    /// Bearer token sent with every request.
    pub access_token: String,
    /// Timeout for one page request.
    pub request_timeout: Duration,
    /// Customer id applied when a query does not filter on one.
    pub default_customer_id: Option<String>,
}

impl Debug for AdminReportsConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AdminReportsConfig")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("default_customer_id", &self.default_customer_id)
            .finish()
    }
}

impl AdminReportsConfig {
    /// Loads the configuration from process environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through `lookup`, one call per variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let value = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let access_token = value(ACCESS_TOKEN_ENV)
            .ok_or_else(|| AppError::Configuration(format!("{ACCESS_TOKEN_ENV} is required")))?;

        let base_url = value(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(base_url.as_str()).map_err(|error| {
            AppError::Configuration(format!("invalid {BASE_URL_ENV} value '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "{BASE_URL_ENV} must be an http(s) URL"
            )));
        }

        let request_timeout_secs = match value(REQUEST_TIMEOUT_ENV) {
            Some(raw) => raw.parse::<u64>().map_err(|error| {
                AppError::Configuration(format!(
                    "invalid {REQUEST_TIMEOUT_ENV} value '{raw}': {error}"
                ))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if request_timeout_secs == 0 {
            return Err(AppError::Configuration(format!(
                "{REQUEST_TIMEOUT_ENV} must be greater than zero"
            )));
        }

        Ok(Self {
            base_url,
            access_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
            default_customer_id: value(CUSTOMER_ID_ENV),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use adminreports_core::AppError;

    use super::{
        ACCESS_TOKEN_ENV, AdminReportsConfig, BASE_URL_ENV, CUSTOMER_ID_ENV, REQUEST_TIMEOUT_ENV,
    };

    fn load(pairs: &[(&str, &str)]) -> Result<AdminReportsConfig, AppError> {
        let values = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect::<HashMap<_, _>>();
        AdminReportsConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = load(&[(ACCESS_TOKEN_ENV, "token")]);
        assert!(config.is_ok());

        let config = config.unwrap_or_else(|_| unreachable!());
        assert_eq!(config.base_url.as_str(), "https://admin.googleapis.com/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.default_customer_id.is_none());
    }

    #[test]
    fn missing_token_is_configuration_error() {
        let config = load(&[(ACCESS_TOKEN_ENV, "   ")]);
        assert!(matches!(config, Err(AppError::Configuration(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = load(&[(ACCESS_TOKEN_ENV, "token"), (BASE_URL_ENV, "not a url")]);
        assert!(matches!(bad_url, Err(AppError::Configuration(_))));

        let zero_timeout = load(&[(ACCESS_TOKEN_ENV, "token"), (REQUEST_TIMEOUT_ENV, "0")]);
        assert!(matches!(zero_timeout, Err(AppError::Configuration(_))));

        let bad_timeout = load(&[(ACCESS_TOKEN_ENV, "token"), (REQUEST_TIMEOUT_ENV, "soon")]);
        assert!(matches!(bad_timeout, Err(AppError::Configuration(_))));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = load(&[
            (ACCESS_TOKEN_ENV, "secret-token"),
            (CUSTOMER_ID_ENV, "C01"),
        ])
        .unwrap_or_else(|_| unreachable!());

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("C01"));
    }
}
