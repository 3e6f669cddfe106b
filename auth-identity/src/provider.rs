use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use config_engine::{IdentityConfig, OfflineUser};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::error::{IdentityError, Result};
use crate::models::IdentityUser;

/// Source of truth for who a user is
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn fetch_user(&self, user_id: &str) -> Result<IdentityUser>;
}

/// Backend API of the hosted identity service (Clerk)
#[derive(Clone)]
pub struct ClerkIdentityProvider {
    client: Client,
    api_url: String,
    secret_key: SecretString,
}

#[derive(Debug, Deserialize)]
struct ClerkUser {
    id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    primary_email_address_id: Option<String>,
    #[serde(default)]
    email_addresses: Vec<ClerkEmail>,
}

#[derive(Debug, Deserialize)]
struct ClerkEmail {
    id: String,
    email_address: String,
}

impl From<ClerkUser> for IdentityUser {
    fn from(user: ClerkUser) -> Self {
        let email = user
            .email_addresses
            .iter()
            .find(|e| Some(&e.id) == user.primary_email_address_id.as_ref())
            .or_else(|| user.email_addresses.first())
            .map(|e| e.email_address.clone());

        let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        IdentityUser {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            full_name: (!full_name.is_empty()).then_some(full_name),
            email,
        }
    }
}

impl ClerkIdentityProvider {
    pub fn new(api_url: &str, secret_key: SecretString, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            secret_key,
        })
    }

    pub fn from_config(config: &IdentityConfig, timeout: Duration) -> Result<Self> {
        let secret_key = config
            .secret_key
            .clone()
            .ok_or_else(|| IdentityError::NotConfigured("identity.secret_key is not set".to_string()))?;
        Self::new(&config.api_url, secret_key, timeout)
    }
}

#[async_trait]
impl IdentityProvider for ClerkIdentityProvider {
    async fn fetch_user(&self, user_id: &str) -> Result<IdentityUser> {
        if user_id.is_empty() || user_id.contains('/') {
            return Err(IdentityError::InvalidUserId);
        }

        debug!(user_id, "Fetching user from identity provider");
        let response = self
            .client
            .get(format!("{}/v1/users/{}", self.api_url, user_id))
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: ClerkUser = response.json().await?;
                Ok(user.into())
            }
            StatusCode::NOT_FOUND => Err(IdentityError::UserNotFound(user_id.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(IdentityError::Unauthorized),
            status => Err(IdentityError::ProviderError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

/// Fixed set of users, for offline mode
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    users: HashMap<String, IdentityUser>,
}

impl StaticIdentityProvider {
    pub fn new(user: IdentityUser) -> Self {
        Self::default().with_user(user)
    }

    pub fn with_user(mut self, user: IdentityUser) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn from_offline(offline: &OfflineUser) -> Self {
        Self::new(IdentityUser {
            id: offline.id.clone(),
            first_name: offline.first_name.clone(),
            last_name: offline.last_name.clone(),
            full_name: None,
            email: offline.email.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn fetch_user(&self, user_id: &str) -> Result<IdentityUser> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| IdentityError::UserNotFound(user_id.to_string()))
    }
}
