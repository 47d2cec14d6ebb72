use serde_derive::Deserialize;

use crate::spec::Object;

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/basic-transfers.md#verification
#[derive(PartialEq, Eq, Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(flatten)]
    pub object: Object,
}
