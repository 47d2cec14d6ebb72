use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

use super::{ObjectStore, Presence};
use crate::error::{StorageError, StorageResult};

/// An in-process [`ObjectStore`] whose links point below a fixed base url.
///
/// Keys are absent until inserted. Keys marked as failing make every lookup
/// return an error.
#[derive(Debug)]
pub struct MemoryStore {
    base_url: Url,
    objects: RwLock<HashMap<String, Presence>>,
    failing: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            objects: RwLock::default(),
            failing: RwLock::default(),
        }
    }

    pub async fn insert(&self, key: impl Into<String>) {
        self.objects.write().await.insert(key.into(), Presence::Present);
    }

    /// Stores `key` such that probing it is denied.
    pub async fn insert_forbidden(&self, key: impl Into<String>) {
        self.objects
            .write()
            .await
            .insert(key.into(), Presence::ForbiddenButPresent);
    }

    pub async fn fail(&self, key: impl Into<String>) {
        self.failing.write().await.insert(key.into());
    }

    fn link(&self, key: &str, method: &str, expires_in: Duration) -> StorageResult<Url> {
        let mut url = self.base_url.join(key)?;
        url.query_pairs_mut()
            .append_pair("method", method)
            .append_pair("expires_in", &expires_in.as_secs().to_string());
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn presence(&self, key: &str) -> StorageResult<Presence> {
        if self.failing.read().await.contains(key) {
            return Err(StorageError::backend(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("lookup of {} failed", key),
            )));
        }
        Ok(self
            .objects
            .read()
            .await
            .get(key)
            .copied()
            .unwrap_or(Presence::Absent))
    }

    async fn download_link(&self, key: &str, expires_in: Duration) -> StorageResult<Url> {
        self.link(key, "GET", expires_in)
    }

    async fn upload_link(&self, key: &str, expires_in: Duration) -> StorageResult<Url> {
        self.link(key, "PUT", expires_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> MemoryStore {
        MemoryStore::new(Url::parse("http://store.test/bucket/").unwrap())
    }

    #[tokio::test]
    async fn presence_reports_each_state() {
        let store = store();
        store.insert("12/34/12345").await;
        store.insert_forbidden("54/32/54321").await;

        assert_eq!(store.presence("12/34/12345").await.unwrap(), Presence::Present);
        assert_eq!(
            store.presence("54/32/54321").await.unwrap(),
            Presence::ForbiddenButPresent
        );
        assert_eq!(store.presence("ab/cd/abcd").await.unwrap(), Presence::Absent);
        assert!(store.exists("54/32/54321").await.unwrap());
        assert!(!store.exists("ab/cd/abcd").await.unwrap());
    }

    #[tokio::test]
    async fn failing_keys_error() {
        let store = store();
        store.insert("12/34/12345").await;
        store.fail("12/34/12345").await;
        assert!(store.exists("12/34/12345").await.is_err());
    }

    #[tokio::test]
    async fn links_are_scoped_to_key_and_method() {
        let store = store();
        let expiry = Duration::from_secs(3600);
        assert_eq!(
            store.download_link("12/34/12345", expiry).await.unwrap().as_str(),
            "http://store.test/bucket/12/34/12345?method=GET&expires_in=3600"
        );
        assert_eq!(
            store.upload_link("12/34/12345", expiry).await.unwrap().as_str(),
            "http://store.test/bucket/12/34/12345?method=PUT&expires_in=3600"
        );
    }
}
