use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{IdentityError, Result};
use crate::models::Session;
use crate::provider::IdentityProvider;

/// Sign-in state persisted to a JSON file between invocations
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    path: PathBuf,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn IdentityProvider>, path: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `user_id` with the identity provider and persist the session
    pub async fn sign_in(&self, user_id: &str) -> Result<Session> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(IdentityError::InvalidUserId);
        }

        let user = self.provider.fetch_user(user_id).await?;
        let session = Session::new(user);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(&session)?;
        tokio::fs::write(&self.path, body).await?;

        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Remove the persisted session; returns whether one existed
    pub async fn sign_out(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Signed out");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// The persisted session, if any
    pub async fn current(&self) -> Result<Option<Session>> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&body) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), "Ignoring unreadable session file");
                Err(IdentityError::CorruptSession(e))
            }
        }
    }

    /// The persisted session, or [`IdentityError::NotSignedIn`]
    pub async fn require(&self) -> Result<Session> {
        self.current().await?.ok_or(IdentityError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentityUser;
    use crate::provider::MockIdentityProvider;
    use mockall::predicate::eq;

    fn manager(dir: &tempfile::TempDir, provider: MockIdentityProvider) -> SessionManager {
        SessionManager::new(Arc::new(provider), dir.path().join("nested/session.json"))
    }

    #[tokio::test]
    async fn test_sign_in_persists_and_sign_out_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_fetch_user()
            .with(eq("user_2abc"))
            .times(1)
            .returning(|id| Ok(IdentityUser::new(id).with_name("Meera", "Iyer")));
        let sessions = manager(&dir, provider);

        assert!(sessions.current().await.unwrap().is_none());

        let session = sessions.sign_in(" user_2abc ").await.unwrap();
        assert_eq!(session.user.display_name(), "Meera Iyer");
        assert_eq!(sessions.require().await.unwrap(), session);

        assert!(sessions.sign_out().await.unwrap());
        assert!(!sessions.sign_out().await.unwrap());
        assert!(matches!(sessions.require().await, Err(IdentityError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_failed_lookup_leaves_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_fetch_user()
            .returning(|id| Err(IdentityError::UserNotFound(id.to_string())));
        let sessions = manager(&dir, provider);

        assert!(sessions.sign_in("user_missing").await.is_err());
        assert!(sessions.current().await.unwrap().is_none());
        assert!(matches!(sessions.sign_in("  ").await, Err(IdentityError::InvalidUserId)));
    }

    #[tokio::test]
    async fn test_corrupt_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{not json").unwrap();

        let sessions = SessionManager::new(Arc::new(MockIdentityProvider::new()), path);
        assert!(matches!(
            sessions.current().await,
            Err(IdentityError::CorruptSession(_))
        ));
    }
}
