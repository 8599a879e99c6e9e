//! crates/academy_core/src/settings.rs
//!
//! The read-through settings accessor: resolve a named site setting from a
//! warm in-memory cache, else from the remote store, else from the static
//! defaults. A read never surfaces an error to the caller; the site always
//! renders something plausible.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::defaults;
use crate::domain::{ContactInfo, HeroContent, SiteStats};
use crate::ports::SettingsSource;

//=========================================================================================
// The Setting Trait
//=========================================================================================

/// A typed singleton settings document with a well-known key and a complete
/// static default.
pub trait Setting: Serialize + DeserializeOwned {
    /// The document name under which the setting is stored.
    const KEY: &'static str;

    fn defaults() -> Self;
}

impl Setting for ContactInfo {
    const KEY: &'static str = "contactInfo";

    fn defaults() -> Self {
        defaults::contact_info()
    }
}

impl Setting for HeroContent {
    const KEY: &'static str = "hero";

    fn defaults() -> Self {
        defaults::hero()
    }
}

impl Setting for SiteStats {
    const KEY: &'static str = "stats";

    fn defaults() -> Self {
        defaults::stats()
    }
}

//=========================================================================================
// SiteSettings (the accessor)
//=========================================================================================

/// Process-wide settings cache in front of a [`SettingsSource`].
///
/// Lifecycle per key: the first successful resolution populates the cache and
/// later reads are served from memory with no store round trip. A failed read
/// caches nothing, so the next call retries the store. There is no TTL and no
/// single-flight de-duplication; concurrent first readers may each issue a
/// redundant read. Admin writes call [`SiteSettings::invalidate`] so the next
/// read observes the edit.
pub struct SiteSettings {
    source: Arc<dyn SettingsSource>,
    cache: RwLock<HashMap<&'static str, JsonValue>>,
}

impl SiteSettings {
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves a setting. Infallible: on any store failure or malformed
    /// document the static defaults are returned for this call only.
    pub async fn get<S: Setting>(&self) -> S {
        if let Some(cached) = self.read_cached::<S>() {
            return cached;
        }

        match self.source.fetch_setting(S::KEY).await {
            Ok(Some(remote)) => {
                let merged = merge_fields(to_json(&S::defaults()), remote);
                match serde_json::from_value::<S>(merged.clone()) {
                    Ok(value) => {
                        self.store_cached(S::KEY, merged);
                        value
                    }
                    Err(e) => {
                        // A document that no longer decodes is treated like a
                        // read failure: defaults now, retry on the next call.
                        warn!(key = S::KEY, "stored setting is malformed: {e}");
                        S::defaults()
                    }
                }
            }
            Ok(None) => {
                let defaults = to_json(&S::defaults());
                self.store_cached(S::KEY, defaults);
                S::defaults()
            }
            Err(e) => {
                warn!(key = S::KEY, "failed to fetch setting, using defaults: {e}");
                S::defaults()
            }
        }
    }

    /// Writes one settings document through to the store and drops the
    /// cached copy, so the next read observes the edit without a reload.
    pub async fn put(&self, key: &str, value: &JsonValue) -> crate::ports::PortResult<()> {
        self.source.put_setting(key, value).await?;
        self.invalidate(key);
        Ok(())
    }

    /// Drops one cached entry so the next read goes back to the store.
    /// Called after an admin settings write.
    pub fn invalidate(&self, key: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(key);
        }
    }

    fn read_cached<S: Setting>(&self) -> Option<S> {
        let cache = self.cache.read().ok()?;
        let value = cache.get(S::KEY)?;
        serde_json::from_value(value.clone()).ok()
    }

    fn store_cached(&self, key: &'static str, value: JsonValue) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, value);
        }
    }
}

/// Merges a remote document over the defaults at FIELD granularity: a field
/// present and non-null in the remote document wins; every other field keeps
/// its default. A partial document (address but no phone) is never discarded
/// wholesale.
fn merge_fields(base: JsonValue, remote: JsonValue) -> JsonValue {
    match (base, remote) {
        (JsonValue::Object(mut base_map), JsonValue::Object(remote_map)) => {
            for (key, value) in remote_map {
                if !value.is_null() {
                    base_map.insert(key, value);
                }
            }
            JsonValue::Object(base_map)
        }
        // A remote document that is not an object cannot be merged; keep the
        // defaults intact.
        (base, _) => base,
    }
}

fn to_json<S: Serialize>(value: &S) -> JsonValue {
    serde_json::to_value(value).unwrap_or(JsonValue::Null)
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// An in-memory settings source with failure injection and a fetch
    /// counter, standing in for the remote document store.
    #[derive(Default)]
    struct MockSource {
        documents: Mutex<HashMap<String, JsonValue>>,
        fail: AtomicBool,
        fetches: AtomicUsize,
    }

    impl MockSource {
        fn put(&self, key: &str, value: JsonValue) {
            self.documents
                .lock()
                .unwrap()
                .insert(key.to_string(), value);
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SettingsSource for MockSource {
        async fn fetch_setting(&self, key: &str) -> PortResult<Option<JsonValue>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(PortError::Unexpected("connection refused".to_string()));
            }
            Ok(self.documents.lock().unwrap().get(key).cloned())
        }

        async fn put_setting(&self, key: &str, value: &JsonValue) -> PortResult<()> {
            self.put(key, value.clone());
            Ok(())
        }
    }

    fn settings_over(source: Arc<MockSource>) -> SiteSettings {
        SiteSettings::new(source)
    }

    #[tokio::test]
    async fn missing_document_returns_full_defaults() {
        let source = Arc::new(MockSource::default());
        let settings = settings_over(source);

        let contact: ContactInfo = settings.get().await;
        assert_eq!(contact, defaults::contact_info());

        let stats: SiteStats = settings.get().await;
        assert_eq!(stats.students_trained, "500+ Students Trained");
    }

    #[tokio::test]
    async fn partial_document_merges_per_field() {
        let source = Arc::new(MockSource::default());
        source.put("contactInfo", json!({ "phone": "+91 8888877777" }));
        let settings = settings_over(source);

        let contact: ContactInfo = settings.get().await;
        assert_eq!(contact.phone, "+91 8888877777");
        // Every other field keeps its default.
        assert_eq!(contact.address, defaults::contact_info().address);
        assert_eq!(contact.email, defaults::contact_info().email);
    }

    #[tokio::test]
    async fn null_fields_do_not_clobber_defaults() {
        let source = Arc::new(MockSource::default());
        source.put("contactInfo", json!({ "phone": null, "hours": "By appointment" }));
        let settings = settings_over(source);

        let contact: ContactInfo = settings.get().await;
        assert_eq!(contact.phone, defaults::contact_info().phone);
        assert_eq!(contact.hours, "By appointment");
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let source = Arc::new(MockSource::default());
        source.put("hero", json!({ "heading": "Annual Day 2026" }));
        let settings = settings_over(source.clone());

        let first: HeroContent = settings.get().await;
        let second: HeroContent = settings.get().await;
        assert_eq!(first, second);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn missing_document_is_cached_too() {
        let source = Arc::new(MockSource::default());
        let settings = settings_over(source.clone());

        let _: SiteStats = settings.get().await;
        let _: SiteStats = settings.get().await;
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_falls_back_without_caching() {
        let source = Arc::new(MockSource::default());
        source.put("contactInfo", json!({ "phone": "+91 7000000000" }));
        source.fail.store(true, Ordering::SeqCst);
        let settings = settings_over(source.clone());

        let during_outage: ContactInfo = settings.get().await;
        assert_eq!(during_outage, defaults::contact_info());

        // The failed read cached nothing, so the next call retries and sees
        // the stored document.
        source.fail.store(false, Ordering::SeqCst);
        let after_recovery: ContactInfo = settings.get().await;
        assert_eq!(after_recovery.phone, "+91 7000000000");
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_read() {
        let source = Arc::new(MockSource::default());
        source.put("stats", json!({ "studentsTrained": "650+ Students Trained" }));
        let settings = settings_over(source.clone());

        let before: SiteStats = settings.get().await;
        assert_eq!(before.students_trained, "650+ Students Trained");

        source.put("stats", json!({ "studentsTrained": "700+ Students Trained" }));
        // Still cached: the edit is not observed...
        let stale: SiteStats = settings.get().await;
        assert_eq!(stale.students_trained, "650+ Students Trained");

        // ...until the admin write path invalidates the key.
        settings.invalidate("stats");
        let fresh: SiteStats = settings.get().await;
        assert_eq!(fresh.students_trained, "700+ Students Trained");
    }

    #[tokio::test]
    async fn put_writes_through_and_drops_the_cached_copy() {
        let source = Arc::new(MockSource::default());
        let settings = settings_over(source.clone());

        // Prime the cache with the defaults (no document yet).
        let before: SiteStats = settings.get().await;
        assert_eq!(before, defaults::stats());

        settings
            .put("stats", &json!({ "studentsTrained": "900+ Students Trained" }))
            .await
            .unwrap();

        let after: SiteStats = settings.get().await;
        assert_eq!(after.students_trained, "900+ Students Trained");
    }

    #[tokio::test]
    async fn non_object_document_keeps_defaults() {
        let source = Arc::new(MockSource::default());
        source.put("hero", json!("not a document"));
        let settings = settings_over(source);

        let hero: HeroContent = settings.get().await;
        assert_eq!(hero, defaults::hero());
    }
}
