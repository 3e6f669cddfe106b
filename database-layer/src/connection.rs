// Hosted database connection over the PostgREST wire protocol
use std::time::Duration;

use async_trait::async_trait;
use config_engine::StoreConfig;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BackendError, DatabaseError, DatabaseResult};
use crate::query::Query;
use crate::store::RemoteStore;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// REST client for the hosted database
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    rest_url: String,
    api_key: SecretString,
}

impl RestStore {
    /// Create a client for the project at `base_url` (without the `/rest/v1` suffix)
    pub fn new(base_url: &str, api_key: SecretString, timeout: Duration) -> DatabaseResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            rest_url: format!("{}{}", base_url.trim_end_matches('/'), crate::REST_PATH),
            api_key,
        })
    }

    pub fn from_config(config: &StoreConfig) -> DatabaseResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| DatabaseError::ConnectionFailed("store.api_key is not set".to_string()))?;
        Self::new(&config.url, api_key, Duration::from_secs(config.timeout_secs))
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", self.api_key.expose_secret())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key.expose_secret()));

        if query.single {
            request = request.header(header::ACCEPT, SINGLE_OBJECT);
        }

        request
    }

    async fn read_rows(&self, table: &str, query: &Query, response: Response) -> DatabaseResult<Vec<Value>> {
        let response = check_status(table, query, response).await?;

        if query.single {
            let row: Value = response.json().await?;
            Ok(vec![row])
        } else {
            let rows: Vec<Value> = response.json().await?;
            Ok(rows)
        }
    }
}

async fn check_status(table: &str, query: &Query, response: Response) -> DatabaseResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // PostgREST answers 406 when a single-object request matched no row
    if status == StatusCode::NOT_ACCEPTABLE && query.single {
        return Err(DatabaseError::RowNotFound(table.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let error = serde_json::from_str::<BackendError>(&body).unwrap_or_else(|_| BackendError {
        message: body.clone(),
        ..Default::default()
    });

    if error.code.as_deref() == Some(INSUFFICIENT_PRIVILEGE) {
        return Err(DatabaseError::RlsPolicyViolation(error.message));
    }

    Err(DatabaseError::QueryFailed {
        status: status.as_u16(),
        error,
    })
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select(&self, table: &str, query: &Query) -> DatabaseResult<Vec<Value>> {
        debug!(table, "select");
        let response = self
            .request(Method::GET, table, query)
            .query(&query.to_params())
            .send()
            .await?;
        self.read_rows(table, query, response).await
    }

    async fn insert(&self, table: &str, row: Value, query: &Query) -> DatabaseResult<Vec<Value>> {
        debug!(table, "insert");
        let response = self
            .request(Method::POST, table, query)
            .query(&[("select", query.select.to_string())])
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;
        self.read_rows(table, query, response).await
    }

    async fn update(&self, table: &str, changes: Value, query: &Query) -> DatabaseResult<Vec<Value>> {
        debug!(table, "update");
        let response = self
            .request(Method::PATCH, table, query)
            .query(&query.to_params())
            .header("Prefer", "return=representation")
            .json(&changes)
            .send()
            .await?;
        self.read_rows(table, query, response).await
    }

    async fn delete(&self, table: &str, query: &Query) -> DatabaseResult<()> {
        debug!(table, "delete");
        let response = self
            .request(Method::DELETE, table, query)
            .query(&query.filter_params())
            .header("Prefer", "return=minimal")
            .send()
            .await?;
        check_status(table, query, response).await?;
        Ok(())
    }

    /// Check that the endpoint answers
    async fn is_healthy(&self) -> bool {
        let request = self
            .client
            .get(format!("{}/", self.rest_url))
            .header("apikey", self.api_key.expose_secret());

        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Remote store health check failed: {}", e);
                false
            }
        }
    }
}
