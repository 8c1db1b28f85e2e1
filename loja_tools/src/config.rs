use std::time::Duration;

use catalog_common::{parse_boolean_flag, Secret};
use log::*;

pub const DEFAULT_API_URL: &str = "https://api.awsli.com.br";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct LojaIntegradaConfig {
    /// API root, without the `/v1` version prefix. e.g. "https://api.awsli.com.br"
    pub base_url: String,
    /// The store's `chave_api`
    pub api_key: Secret<String>,
    /// The integrating application's `aplicacao` id
    pub app_id: String,
    pub timeout: Duration,
    /// Ask the API to return product descriptions as HTML
    pub description_html: bool,
}

impl Default for LojaIntegradaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: Secret::default(),
            app_id: String::default(),
            timeout: DEFAULT_TIMEOUT,
            description_html: true,
        }
    }
}

impl LojaIntegradaConfig {
    pub fn new(api_key: &str, app_id: &str) -> Self {
        let api_key = Secret::new(api_key.trim().to_string());
        Self { api_key, app_id: app_id.trim().to_string(), ..Default::default() }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("LI_API_URL").unwrap_or_else(|_| {
            debug!("LI_API_URL not set, using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        let api_key = Secret::new(std::env::var("LI_API_KEY").unwrap_or_else(|_| {
            warn!("LI_API_KEY not set. Requests will fail unless a key is supplied some other way");
            String::default()
        }));
        let app_id = std::env::var("LI_APP_ID").unwrap_or_else(|_| {
            warn!("LI_APP_ID not set. Requests will fail unless an application id is supplied some other way");
            String::default()
        });
        let timeout = std::env::var("LI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("{s} is not a valid value for LI_TIMEOUT_SECS. {e}. Using the default."))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let description_html = parse_boolean_flag(std::env::var("LI_DESCRIPTION_HTML").ok(), true);
        Self { base_url, api_key, app_id, timeout, description_html }
    }

    /// Both credentials are needed for every request.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.app_id.trim().is_empty()
    }

    /// The value of the `Authorization` header. This reveals the API key, so don't log it.
    pub fn authorization(&self) -> String {
        format!("chave_api {} aplicacao {}", self.api_key.reveal(), self.app_id)
    }

    /// The `Authorization` header with the API key masked, for display.
    pub fn masked_authorization(&self) -> String {
        format!("chave_api {} aplicacao {}", self.api_key, self.app_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn authorization_header() {
        let config = LojaIntegradaConfig::new(" 7b9d04db65e45dcbf8c3 ", "fc665b96-2434");
        assert_eq!(config.authorization(), "chave_api 7b9d04db65e45dcbf8c3 aplicacao fc665b96-2434");
        assert_eq!(config.masked_authorization(), "chave_api **** aplicacao fc665b96-2434");
        assert!(config.is_complete());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!LojaIntegradaConfig::default().is_complete());
    }
}
