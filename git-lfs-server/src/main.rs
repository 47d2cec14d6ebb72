use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::sync::Arc;
use structopt::StructOpt;

use git_lfs_server::config::Opt;
use git_lfs_server::routes::{self, AppState};
use git_lfs_server::storage::S3Store;
use git_lfs_server::{LfsServer, TokenSigner};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let signer = TokenSigner::new(opt.secret.as_bytes())?;
    let store = S3Store::new(opt.s3_config()).await;
    info!("brokering {:?}", store);

    let state = web::Data::new(AppState {
        server: LfsServer::new(Arc::new(store), signer),
        public_url: opt.public_url.clone(),
    });

    info!("listening on {}", opt.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&opt.bind)
    .with_context(|| format!("could not bind {}", opt.bind))?
    .run()
    .await?;
    Ok(())
}
