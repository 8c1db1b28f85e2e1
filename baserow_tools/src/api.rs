use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::BaserowConfig,
    data_objects::NewTable,
    Application,
    BaserowApiError,
    Field,
    FieldDefinition,
    Table,
    User,
    Workspace,
};

#[derive(Clone)]
pub struct BaserowApi {
    config: BaserowConfig,
    client: Arc<Client>,
}

impl BaserowApi {
    pub fn new(config: BaserowConfig) -> Result<Self, BaserowApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let mut val = HeaderValue::from_str(format!("Token {}", config.token.reveal()).as_str())
            .map_err(|e| BaserowApiError::Initialization(format!("Invalid token. {e}")))?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BaserowApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.as_str()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, BaserowApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| BaserowApiError::RestRequestError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| BaserowApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| BaserowApiError::RestRequestError(e.to_string()))?;
            Err(BaserowApiError::QueryError { status, message })
        }
    }

    /// Checks the URL and token by fetching the account they belong to.
    pub async fn test_connection(&self) -> Result<User, BaserowApiError> {
        debug!("Testing connection to {}", self.config.base_url);
        let user = self.rest_query::<User, ()>(Method::GET, "/api/user/", None).await?;
        info!("Connected to Baserow as {}", user.username);
        Ok(user)
    }

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, BaserowApiError> {
        debug!("Fetching workspaces");
        let result = self.rest_query::<Vec<Workspace>, ()>(Method::GET, "/api/workspaces/", None).await?;
        info!("Fetched {} workspaces", result.len());
        Ok(result)
    }

    pub async fn list_databases(&self, workspace_id: i64) -> Result<Vec<Application>, BaserowApiError> {
        let path = format!("/api/workspaces/{workspace_id}/applications/");
        debug!("Fetching databases in workspace {workspace_id}");
        let result = self.rest_query::<Vec<Application>, ()>(Method::GET, &path, None).await?;
        info!("Fetched {} databases in workspace {workspace_id}", result.len());
        Ok(result)
    }

    pub async fn list_tables(&self, database_id: i64) -> Result<Vec<Table>, BaserowApiError> {
        let path = format!("/api/database/tables/database/{database_id}/");
        debug!("Fetching tables in database {database_id}");
        let result = self.rest_query::<Vec<Table>, ()>(Method::GET, &path, None).await?;
        info!("Fetched {} tables in database {database_id}", result.len());
        Ok(result)
    }

    pub async fn create_table(
        &self,
        database_id: i64,
        name: &str,
        fields: &[FieldDefinition],
    ) -> Result<Table, BaserowApiError> {
        let path = format!("/api/database/tables/database/{database_id}/");
        let body = NewTable { name, data: fields };
        debug!("Creating table '{name}' with {} fields in database {database_id}", fields.len());
        let table = self.rest_query::<Table, NewTable>(Method::POST, &path, Some(body)).await?;
        info!("Created table '{name}' (ID: {})", table.id);
        Ok(table)
    }

    pub async fn get_table_fields(&self, table_id: i64) -> Result<Vec<Field>, BaserowApiError> {
        let path = format!("/api/database/fields/table/{table_id}/");
        debug!("Fetching fields of table {table_id}");
        let result = self.rest_query::<Vec<Field>, ()>(Method::GET, &path, None).await?;
        info!("Fetched {} fields of table {table_id}", result.len());
        Ok(result)
    }
}
