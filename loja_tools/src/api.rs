use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde_json::Value;

use crate::{config::LojaIntegradaConfig, LojaApiError};

/// A successful response to a list request, with the transport details the prober reports.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub payload: Value,
}

#[derive(Clone)]
pub struct LojaIntegradaApi {
    config: LojaIntegradaConfig,
    client: Arc<Client>,
}

impl LojaIntegradaApi {
    pub fn new(config: LojaIntegradaConfig) -> Result<Self, LojaApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let mut val = HeaderValue::from_str(config.authorization().as_str())
            .map_err(|e| LojaApiError::Initialization(format!("Invalid credentials. {e}")))?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| LojaApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &LojaIntegradaConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Query string for a product page.
    pub fn product_query(&self, limit: u32, offset: u32) -> Vec<(&'static str, String)> {
        vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("description_html", u8::from(self.config.description_html).to_string()),
        ]
    }

    /// Sends a GET request and decodes the body as JSON. Only the one page asked for is fetched; `meta.next` is not
    /// followed.
    pub async fn get_page(&self, path: &str, params: &[(&str, String)]) -> Result<PageResponse, LojaApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| LojaApiError::RestRequestError(e.to_string()))?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect::<Vec<(String, String)>>();
        let body = response.text().await.map_err(|e| LojaApiError::RestRequestError(e.to_string()))?;
        if !status.is_success() {
            return Err(LojaApiError::QueryError { status: status.as_u16(), message: body });
        }
        trace!("REST query successful. {status}");
        let payload = serde_json::from_str::<Value>(&body)
            .map_err(|e| LojaApiError::JsonError(format!("{e}. Response: {body}")))?;
        Ok(PageResponse { status: status.as_u16(), headers, payload })
    }

    pub async fn fetch_products(&self, limit: u32, offset: u32) -> Result<PageResponse, LojaApiError> {
        debug!("Fetching products. limit={limit}, offset={offset}");
        let params = self.product_query(limit, offset);
        let page = self.get_page("/produto", &params).await?;
        info!("Fetched product page at offset {offset}");
        Ok(page)
    }

    pub async fn fetch_prices(&self, limit: u32, offset: u32) -> Result<PageResponse, LojaApiError> {
        debug!("Fetching prices. limit={limit}, offset={offset}");
        let params = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let page = self.get_page("/produto_preco", &params).await?;
        info!("Fetched price page at offset {offset}");
        Ok(page)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn urls_and_query() {
        let mut config = LojaIntegradaConfig::new("key", "app");
        config.base_url = "https://api.awsli.com.br/".into();
        let api = LojaIntegradaApi::new(config).unwrap();
        assert_eq!(api.url("/produto"), "https://api.awsli.com.br/v1/produto");
        let query = api.product_query(5, 0);
        assert_eq!(query, vec![
            ("limit", "5".to_string()),
            ("offset", "0".to_string()),
            ("description_html", "1".to_string())
        ]);
    }

    #[test]
    fn invalid_credentials_are_rejected() {
        let config = LojaIntegradaConfig::new("bad\nkey", "app");
        assert!(matches!(LojaIntegradaApi::new(config), Err(LojaApiError::Initialization(_))));
    }
}
