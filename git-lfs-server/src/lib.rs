//! Server side of the Git LFS batch API.
//!
//! Batch requests are answered with links signed by the object store, so object
//! bytes never pass through this server. Uploads get a verify link whose token
//! is an HMAC of the object's oid and size.

pub mod batch;
pub mod config;
pub mod error;
pub mod object;
pub mod public_url;
pub mod routes;
pub mod storage;
pub mod token;
mod verify;

pub use batch::{LfsServer, LINK_EXPIRY};
pub use error::{Error, StorageError};
pub use public_url::PublicUrl;
pub use storage::{ObjectStore, Presence};
pub use token::TokenSigner;
