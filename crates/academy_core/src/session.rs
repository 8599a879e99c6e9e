//! crates/academy_core/src/session.rs
//!
//! Profile resolution and activity logging for authenticated sessions.
//!
//! An authenticated identity may legitimately have no stored profile document
//! (a signup that failed partway leaves an orphaned identity); in that case a
//! default-role profile is synthesized rather than blocking login. A transient
//! store error during the lookup leaves the profile unknown, which callers
//! must treat as distinct from "not authenticated".

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{HistoryEntry, SessionIdentity, UserProfile};
use crate::ports::{IdentityStore, PortResult};

/// Looks up the profile document for an authenticated identity.
///
/// - stored profile found: that profile;
/// - no profile document: a synthesized profile with role `user`;
/// - store error: `None` ("authenticated but profile still unknown").
///   The lookup is not retried.
pub async fn resolve_profile(
    store: &dyn IdentityStore,
    identity: &SessionIdentity,
) -> Option<UserProfile> {
    match store.get_profile(identity.uid).await {
        Ok(Some(profile)) => Some(profile),
        Ok(None) => Some(UserProfile::synthesized(
            identity.uid,
            identity.display_name.as_deref(),
            &identity.email,
        )),
        Err(e) => {
            warn!(uid = %identity.uid, "profile lookup failed: {e}");
            None
        }
    }
}

/// Appends one history entry for the given user. A no-op when `uid` is
/// `None` (unauthenticated): no entry is created and no error is raised.
pub async fn log_history(
    store: &dyn IdentityStore,
    uid: Option<Uuid>,
    action: &str,
    description: &str,
    meta: Option<JsonValue>,
) -> PortResult<()> {
    let Some(uid) = uid else {
        return Ok(());
    };
    let entry = HistoryEntry {
        id: Uuid::new_v4(),
        uid,
        action: action.to_string(),
        description: description.to_string(),
        timestamp: Utc::now(),
        meta,
    };
    store.append_history(&entry).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserCredentials};
    use crate::ports::PortError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockIdentityStore {
        profiles: Mutex<HashMap<Uuid, UserProfile>>,
        history: Mutex<Vec<HistoryEntry>>,
        fail_profile_lookup: AtomicBool,
    }

    #[async_trait]
    impl IdentityStore for MockIdentityStore {
        async fn create_identity(
            &self,
            _email: &str,
            _display_name: &str,
            _hashed_password: &str,
        ) -> PortResult<Uuid> {
            Ok(Uuid::new_v4())
        }

        async fn get_credentials_by_email(&self, email: &str) -> PortResult<UserCredentials> {
            Err(PortError::NotFound(email.to_string()))
        }

        async fn create_auth_session(
            &self,
            _session_id: &str,
            _uid: Uuid,
            _expires_at: DateTime<Utc>,
        ) -> PortResult<()> {
            Ok(())
        }

        async fn validate_auth_session(&self, session_id: &str) -> PortResult<SessionIdentity> {
            Err(PortError::NotFound(session_id.to_string()))
        }

        async fn delete_auth_session(&self, _session_id: &str) -> PortResult<()> {
            Ok(())
        }

        async fn get_profile(&self, uid: Uuid) -> PortResult<Option<UserProfile>> {
            if self.fail_profile_lookup.load(Ordering::SeqCst) {
                return Err(PortError::Unexpected("timeout".to_string()));
            }
            Ok(self.profiles.lock().unwrap().get(&uid).cloned())
        }

        async fn create_profile(&self, profile: &UserProfile) -> PortResult<()> {
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.uid, profile.clone());
            Ok(())
        }

        async fn append_history(&self, entry: &HistoryEntry) -> PortResult<()> {
            self.history.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn history_for_user(&self, uid: Uuid) -> PortResult<Vec<HistoryEntry>> {
            let mut entries: Vec<HistoryEntry> = self
                .history
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.uid == uid)
                .cloned()
                .collect();
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(entries)
        }
    }

    fn identity(uid: Uuid) -> SessionIdentity {
        SessionIdentity {
            uid,
            email: "dancer@example.in".to_string(),
            display_name: Some("Meera".to_string()),
        }
    }

    #[tokio::test]
    async fn missing_profile_synthesizes_default_role() {
        let store = MockIdentityStore::default();
        let uid = Uuid::new_v4();

        let profile = resolve_profile(&store, &identity(uid)).await.unwrap();
        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.username, "Meera");
        assert_eq!(profile.uid, uid);
    }

    #[tokio::test]
    async fn missing_profile_and_display_name_falls_back_to_user() {
        let store = MockIdentityStore::default();
        let anon = SessionIdentity {
            uid: Uuid::new_v4(),
            email: "x@example.in".to_string(),
            display_name: None,
        };

        let profile = resolve_profile(&store, &anon).await.unwrap();
        assert_eq!(profile.username, "User");
    }

    #[tokio::test]
    async fn stored_profile_wins_over_synthesis() {
        let store = MockIdentityStore::default();
        let uid = Uuid::new_v4();
        let stored = UserProfile {
            uid,
            username: "guru_admin".to_string(),
            email: "admin@example.in".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        store.create_profile(&stored).await.unwrap();

        let profile = resolve_profile(&store, &identity(uid)).await.unwrap();
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.username, "guru_admin");
    }

    #[tokio::test]
    async fn lookup_error_leaves_profile_unknown() {
        let store = MockIdentityStore::default();
        store.fail_profile_lookup.store(true, Ordering::SeqCst);

        let profile = resolve_profile(&store, &identity(Uuid::new_v4())).await;
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn log_history_is_a_no_op_when_unauthenticated() {
        let store = MockIdentityStore::default();

        log_history(&store, None, "login", "Signed in", None)
            .await
            .unwrap();
        assert!(store.history.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn log_history_appends_exactly_one_tagged_entry() {
        let store = MockIdentityStore::default();
        let uid = Uuid::new_v4();

        log_history(&store, Some(uid), "login", "Signed in", None)
            .await
            .unwrap();

        let entries = store.history_for_user(uid).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "login");
        assert_eq!(entries[0].uid, uid);
    }

    #[tokio::test]
    async fn history_is_returned_newest_first() {
        let store = MockIdentityStore::default();
        let uid = Uuid::new_v4();

        log_history(&store, Some(uid), "signup", "Account created", None)
            .await
            .unwrap();
        log_history(&store, Some(uid), "login", "Signed in", None)
            .await
            .unwrap();

        let entries = store.history_for_user(uid).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].timestamp >= entries[1].timestamp);
    }
}
