//! Serde types for the [Git LFS API](https://github.com/git-lfs/git-lfs/tree/main/docs/api).

mod spec;

pub use spec::*;
