// Create-on-first-login practitioner profile
use database_layer::{expect_single, tables, OwnerScope, Query, RemoteStore};
use tracing::{error, info};

use crate::error::Result;
use crate::models::{IdentityUser, NewProfile, Profile};

/// Column owning a profile row
pub const PROFILE_OWNER_COLUMN: &str = "user_id";

/// Look up the user's profile, inserting one when none exists yet.
///
/// The insert carries only `user_id` and `full_name`; the table has no email column.
pub async fn ensure_profile(store: &dyn RemoteStore, user: &IdentityUser) -> Result<Profile> {
    let scope = OwnerScope::new(user.practitioner_id()).on_column(PROFILE_OWNER_COLUMN);

    let existing = store
        .select(tables::PROFILES, &scope.apply(Query::new()))
        .await?
        .into_iter()
        .next();

    if let Some(row) = existing {
        return Ok(serde_json::from_value(row)?);
    }

    let payload = scope.stamp(serde_json::to_value(NewProfile {
        full_name: user.display_name(),
    })?)?;
    let rows = store
        .insert(tables::PROFILES, payload, &Query::new().single())
        .await?;
    let profile: Profile = serde_json::from_value(expect_single(tables::PROFILES, rows)?)?;

    info!(user_id = %user.id, "Created practitioner profile");
    Ok(profile)
}

/// [`ensure_profile`] for the sign-in path: failures are logged and never block the session
pub async fn bootstrap_profile(store: &dyn RemoteStore, user: &IdentityUser) -> Option<Profile> {
    match ensure_profile(store, user).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            error!(user_id = %user.id, error = %e, "Error managing profile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentityError;
    use database_layer::MemoryStore;

    #[tokio::test]
    async fn test_profile_is_created_once() {
        let store = MemoryStore::new();
        let user = IdentityUser::new("user_2abc").with_name("Meera", "Iyer");

        let created = ensure_profile(&store, &user).await.unwrap();
        assert_eq!(created.user_id, "user_2abc");
        assert_eq!(created.full_name, "Meera Iyer");

        let again = ensure_profile(&store, &user).await.unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(store.rows(tables::PROFILES).len(), 1);
        assert!(store.rows(tables::PROFILES)[0].get("email").is_none());
    }

    #[tokio::test]
    async fn test_nameless_user_gets_placeholder_name() {
        let store = MemoryStore::new();
        let profile = ensure_profile(&store, &IdentityUser::new("user_x")).await.unwrap();
        assert_eq!(profile.full_name, "Unknown Doctor");
    }

    #[tokio::test]
    async fn test_malformed_profile_row_is_a_decode_error() {
        let store = MemoryStore::new();
        store
            .seed(
                tables::PROFILES,
                vec![serde_json::json!({
                    "id": "7d3f6c1e-2b4a-4c8e-9f10-3a5b6c7d8e9f",
                    "user_id": "user_2abc",
                    "full_name": "Meera Iyer"
                })],
            )
            .unwrap();

        let err = ensure_profile(&store, &IdentityUser::new("user_2abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Decode(_)));
        assert!(err.to_string().starts_with("Malformed identity data"));
        assert_eq!(store.rows(tables::PROFILES).len(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_swallows_store_failure() {
        let store = MemoryStore::new();
        store.fail_next("connection refused");

        let profile = bootstrap_profile(&store, &IdentityUser::new("user_2abc")).await;
        assert!(profile.is_none());
        assert!(store.rows(tables::PROFILES).is_empty());
    }
}
