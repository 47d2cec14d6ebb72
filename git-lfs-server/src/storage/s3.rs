//! S3-compatible object store reached through the AWS SDK.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::{PresignedRequest, PresigningConfig};
use aws_sdk_s3::Client;
use log::debug;
use std::time::Duration;
use url::Url;

use super::{ObjectStore, Presence};
use crate::error::{StorageError, StorageResult};

#[derive(Debug, Clone, Default)]
pub struct S3Config {
    pub bucket: String,
    /// Prepended to every sharded key, without a trailing slash.
    pub prefix: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services such as MinIO.
    pub endpoint: Option<String>,
    pub force_path_style: bool,
}

pub struct S3Store {
    client: Client,
    bucket: String,
    prefix: Option<String>,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl S3Store {
    /// Builds a client from the ambient AWS configuration (environment, profile, instance role).
    pub async fn new(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region {
            loader = loader.region(Region::new(region));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket,
            prefix: config.prefix.as_deref().and_then(normalize_prefix),
        }
    }

    fn full_key(&self, key: &str) -> String {
        full_key(self.prefix.as_deref(), key)
    }
}

fn normalize_prefix(prefix: &str) -> Option<String> {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    }
}

fn full_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}/{}", prefix, key),
        None => key.to_string(),
    }
}

/// Interprets the status of a failed HEAD request.
///
/// A 403 is only returned for keys that exist but are unreadable with our
/// credentials, so it is taken as proof of presence.
fn presence_from_status(status: u16) -> Option<Presence> {
    match status {
        404 => Some(Presence::Absent),
        403 => Some(Presence::ForbiddenButPresent),
        _ => None,
    }
}

fn link(request: PresignedRequest) -> StorageResult<Url> {
    Ok(Url::parse(request.uri())?)
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn presence(&self, key: &str) -> StorageResult<Presence> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .send()
            .await;
        match result {
            Ok(_) => Ok(Presence::Present),
            Err(err) => {
                if let SdkError::ServiceError(ref service_err) = err {
                    let status = service_err.raw().status().as_u16();
                    if let Some(presence) = presence_from_status(status) {
                        debug!("HEAD of {} answered {}", key, status);
                        return Ok(presence);
                    }
                }
                Err(StorageError::backend(err))
            }
        }
    }

    async fn download_link(&self, key: &str, expires_in: Duration) -> StorageResult<Url> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(StorageError::backend)?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .presigned(presigning)
            .await
            .map_err(StorageError::backend)?;
        link(request)
    }

    async fn upload_link(&self, key: &str, expires_in: Duration) -> StorageResult<Url> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(StorageError::backend)?;
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .presigned(presigning)
            .await
            .map_err(StorageError::backend)?;
        link(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn head_statuses_map_to_presence() {
        assert_eq!(presence_from_status(404), Some(Presence::Absent));
        assert_eq!(presence_from_status(403), Some(Presence::ForbiddenButPresent));
        assert_eq!(presence_from_status(500), None);
        assert_eq!(presence_from_status(400), None);
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("lfs/"), Some("lfs".to_string()));
        assert_eq!(normalize_prefix("team/lfs"), Some("team/lfs".to_string()));
        assert_eq!(normalize_prefix("/"), None);
        assert_eq!(normalize_prefix(""), None);
    }

    #[test]
    fn full_key_applies_prefix() {
        assert_eq!(full_key(Some("lfs"), "12/34/12345"), "lfs/12/34/12345");
        assert_eq!(full_key(None, "12/34/12345"), "12/34/12345");
    }

    /// Needs credentials and a bucket named by `LFS_TEST_BUCKET`.
    #[tokio::test]
    #[ignore]
    async fn links_and_presence_against_live_bucket() {
        let bucket = std::env::var("LFS_TEST_BUCKET").unwrap();
        let store = S3Store::new(S3Config {
            bucket,
            ..S3Config::default()
        })
        .await;
        let key = "00/00/0000-git-lfs-server-missing";
        assert_eq!(store.presence(key).await.unwrap(), Presence::Absent);

        let expiry = Duration::from_secs(3600);
        let download = store.download_link(key, expiry).await.unwrap();
        let upload = store.upload_link(key, expiry).await.unwrap();
        assert!(download.path().ends_with(key));
        assert!(upload.path().ends_with(key));
        assert!(download.query().unwrap().contains("X-Amz-Expires=3600"));
    }
}
