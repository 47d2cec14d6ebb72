//! The object store the server brokers access to.
//!
//! The server never moves object bytes. It only asks the store whether a key is
//! populated and has it mint short-lived links that clients use directly.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::error::StorageResult;

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::{S3Config, S3Store};

/// Answer to a metadata lookup of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
    /// The probing credential may not read the key, which the store only
    /// reports for keys that exist.
    ForbiddenButPresent,
}

impl Presence {
    pub fn exists(self) -> bool {
        match self {
            Presence::Present | Presence::ForbiddenButPresent => true,
            Presence::Absent => false,
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Looks `key` up in the store. Errors other than not-found and forbidden are returned as is.
    async fn presence(&self, key: &str) -> StorageResult<Presence>;

    /// A signed link allowing a single GET of `key`.
    async fn download_link(&self, key: &str, expires_in: Duration) -> StorageResult<Url>;

    /// A signed link allowing a single PUT of `key`.
    async fn upload_link(&self, key: &str, expires_in: Duration) -> StorageResult<Url>;

    /// Not cached: every call asks the store again.
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.presence(key).await?.exists())
    }
}
