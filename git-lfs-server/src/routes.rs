//! HTTP surface of the server.
//!
//! Callers are authenticated before they reach these handlers.

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use git_lfs_spec::batch::BatchRequest;
use git_lfs_spec::transfer::basic::VerifyRequest;
use git_lfs_spec::GIT_LFS_CONTENT_TYPE;
use serde::Deserialize;

use crate::batch::LfsServer;
use crate::error::Error;
use crate::public_url::PublicUrl;

/// Batch requests list every object of a push, so allow more than actix's default.
const MAX_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;

pub struct AppState {
    pub server: LfsServer,
    /// Falls back to the scheme and host of each request when unset.
    pub public_url: Option<PublicUrl>,
}

impl AppState {
    fn public_url(&self, req: &HttpRequest) -> Result<PublicUrl, Error> {
        match &self.public_url {
            Some(public_url) => Ok(public_url.clone()),
            None => {
                let info = req.connection_info();
                Ok(PublicUrl::from_connection(info.scheme(), info.host())?)
            }
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .route("/objects/batch", web::post().to(batch))
        .route("/verify", web::post().to(verify));
}

/// Clients send `application/vnd.git-lfs+json`, so bodies are parsed whatever their content type.
async fn batch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let request: BatchRequest = serde_json::from_slice(&body)?;
    let public_url = state.public_url(&req)?;
    let response = state.server.batch(request, &public_url).await;
    Ok(HttpResponse::Ok()
        .content_type(GIT_LFS_CONTENT_TYPE)
        .json(response))
}

#[derive(Debug, Deserialize)]
struct VerifyQuery {
    h: Option<String>,
}

/// A wrong token and a missing object both answer 404.
async fn verify(
    query: web::Query<VerifyQuery>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let request: VerifyRequest = serde_json::from_slice(&body)?;
    let verified = match &query.h {
        Some(token) => state.server.verify(&request.object, token).await?,
        None => false,
    };
    let status = if verified {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok(HttpResponse::build(status).finish())
}
