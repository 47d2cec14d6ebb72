use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use git_lfs_spec::{batch::LfsErrorResponse, GIT_LFS_CONTENT_TYPE};
use thiserror::Error;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("error received from the object store: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("object store produced an invalid link: {0}")]
    Link(#[from] url::ParseError),
}

impl StorageError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageError::Backend(Box::new(err))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("object id `{0}` is too short to shard")]
pub struct InvalidOid(pub String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("verification secret must not be empty")]
pub struct InvalidSecret;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PublicUrlError {
    #[error("could not parse public url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("public url must use http or https, not `{0}`")]
    Scheme(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed request body: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    PublicUrl(#[from] PublicUrlError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Payload(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::PublicUrl(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Error::Payload(err) => HttpResponse::build(self.status_code())
                .content_type(GIT_LFS_CONTENT_TYPE)
                .json(LfsErrorResponse::validation(err.to_string())),
            // Backend details stay in the server log.
            Error::Storage(_) | Error::PublicUrl(_) => HttpResponse::new(self.status_code()),
        }
    }
}
