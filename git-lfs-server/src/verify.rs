use git_lfs_spec::Object;
use log::debug;

use crate::batch::LfsServer;
use crate::error::StorageResult;
use crate::object::sharded_key;

impl LfsServer {
    /// https://github.com/git-lfs/git-lfs/blob/main/docs/api/basic-transfers.md#verification
    ///
    /// True only when `token` was issued for exactly this oid and size and the
    /// store now holds the object. The store may lag behind a finished upload,
    /// in which case clients retry.
    pub async fn verify(&self, object: &Object, token: &str) -> StorageResult<bool> {
        if !self.signer.verify(&object.oid, object.size, token) {
            debug!("verify of {} presented a bad token", object.oid);
            return Ok(false);
        }
        let key = match sharded_key(&object.oid) {
            Ok(key) => key,
            Err(_) => return Ok(false),
        };
        let exists = self.store.exists(&key).await?;
        debug!("verify of {}: exists={}", object.oid, exists);
        Ok(exists)
    }
}
