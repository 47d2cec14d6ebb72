use futures::stream::{self, StreamExt};
use git_lfs_spec::batch::{
    Action, Actions, BatchRequest, BatchResponse, ObjectError, ObjectOutcome, ObjectResponse,
    Operation, Transfer,
};
use git_lfs_spec::Object;
use log::{debug, error};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::StorageResult;
use crate::object::sharded_key;
use crate::public_url::PublicUrl;
use crate::storage::ObjectStore;
use crate::token::TokenSigner;

/// Lifetime of every link handed out, whatever the action.
pub const LINK_EXPIRY: Duration = Duration::from_secs(3600);

/// Most objects of one batch resolved against the store at a time.
pub const MAX_CONCURRENT_OBJECTS: usize = 64;

/// Brokers access to the objects of one store.
///
/// Holds no mutable state, so a single instance serves all requests.
#[derive(Clone)]
pub struct LfsServer {
    pub(crate) store: Arc<dyn ObjectStore>,
    pub(crate) signer: TokenSigner,
}

fn action(href: Url) -> Action {
    Action::new(href).expires_in(LINK_EXPIRY.as_secs())
}

impl LfsServer {
    pub fn new(store: Arc<dyn ObjectStore>, signer: TokenSigner) -> Self {
        Self { store, signer }
    }

    /// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md
    ///
    /// Objects are resolved independently, up to [`MAX_CONCURRENT_OBJECTS`] at a
    /// time; the response lists them in request order. Only the basic transfer
    /// is ever offered.
    pub async fn batch(&self, request: BatchRequest, public_url: &PublicUrl) -> BatchResponse {
        debug!(
            "batch {:?} of {} objects",
            request.operation,
            request.objects.len()
        );
        let operation = request.operation;
        let objects: Vec<ObjectResponse> = stream::iter(request.objects)
            .map(|object| self.object_response(operation, object, public_url))
            .buffered(MAX_CONCURRENT_OBJECTS)
            .collect()
            .await;
        BatchResponse {
            transfer: Transfer::Basic,
            objects,
        }
    }

    async fn object_response(
        &self,
        operation: Operation,
        object: Object,
        public_url: &PublicUrl,
    ) -> ObjectResponse {
        let key = match sharded_key(&object.oid) {
            Ok(key) => key,
            Err(err) => {
                debug!("{}", err);
                return ObjectResponse::error(object, ObjectError::VALIDATION_ERROR);
            }
        };
        match self.outcome(operation, &object, &key, public_url).await {
            Ok(outcome) => ObjectResponse {
                object,
                authenticated: Some(true),
                outcome,
            },
            Err(err) => {
                error!("{:?} of {} failed: {}", operation, object.oid, err);
                ObjectResponse::error(object, ObjectError::INTERNAL_ERROR)
            }
        }
    }

    async fn outcome(
        &self,
        operation: Operation,
        object: &Object,
        key: &str,
        public_url: &PublicUrl,
    ) -> StorageResult<ObjectOutcome> {
        let exists = self.store.exists(key).await?;
        let outcome = match (operation, exists) {
            (Operation::Download, true) => {
                let download = self.store.download_link(key, LINK_EXPIRY).await?;
                ObjectOutcome::Actions(Actions::download(action(download)))
            }
            (Operation::Download, false) => ObjectOutcome::Error(ObjectError::DOES_NOT_EXIST),
            (Operation::Upload, true) => ObjectOutcome::NothingToDo,
            (Operation::Upload, false) => {
                let upload = self.store.upload_link(key, LINK_EXPIRY).await?;
                let verify = public_url.verify_link(&self.signer.sign(&object.oid, object.size));
                ObjectOutcome::Actions(Actions::upload_and_verify(action(upload), action(verify)))
            }
        };
        Ok(outcome)
    }
}
