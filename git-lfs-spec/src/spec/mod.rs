use serde_derive::{Deserialize, Serialize};

pub mod batch;
pub mod transfer;

/// An object as identified by the client: its content hash and byte length.
#[derive(PartialEq, Eq, Debug, Deserialize, Serialize, Clone)]
pub struct Object {
    pub oid: String,
    pub size: u64,
}

pub const GIT_LFS_CONTENT_TYPE: &str = "application/vnd.git-lfs+json";
