use catalog_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct BaserowConfig {
    /// The Baserow instance, e.g. "https://api.baserow.io" or a self-hosted domain. Never ends with a `/`.
    pub base_url: String,
    /// A database token or JWT, sent as `Authorization: Token <token>`
    pub token: Secret<String>,
}

impl BaserowConfig {
    pub fn new(base_url: &str, token: &str) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Self { base_url, token: Secret::new(token.trim().to_string()) }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("BASEROW_URL").unwrap_or_else(|_| {
            debug!("BASEROW_URL not set");
            String::default()
        });
        let token = std::env::var("BASEROW_TOKEN").unwrap_or_else(|_| {
            debug!("BASEROW_TOKEN not set");
            String::default()
        });
        Self::new(&base_url, &token)
    }

    /// The URL and the token are both required.
    pub fn is_complete(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = BaserowConfig::new(" https://baserow.example.com/ ", " tok ");
        assert_eq!(config.base_url, "https://baserow.example.com");
        assert_eq!(config.token.reveal(), "tok");
        assert!(config.is_complete());
        assert!(!BaserowConfig::new("https://baserow.example.com", "").is_complete());
        assert!(!BaserowConfig::default().is_complete());
    }
}
