use structopt::StructOpt;

use crate::public_url::PublicUrl;
use crate::storage::S3Config;

/// Every option can also be given through the environment.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "git-lfs-server",
    about = "Git LFS batch API server backed by an S3-compatible object store"
)]
pub struct Opt {
    /// Address to listen on
    #[structopt(long, env = "LFS_BIND", default_value = "127.0.0.1:5002")]
    pub bind: String,

    /// Base url clients reach this server at; derived from each request's Host header if unset
    #[structopt(long, env = "LFS_PUBLIC_URL")]
    pub public_url: Option<PublicUrl>,

    /// Key for the HMAC carried by verify links
    #[structopt(long, env = "LFS_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Bucket holding LFS objects
    #[structopt(long, env = "LFS_BUCKET")]
    pub bucket: String,

    /// Key prefix inside the bucket
    #[structopt(long, env = "LFS_PREFIX")]
    pub prefix: Option<String>,

    #[structopt(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Endpoint of an S3-compatible service
    #[structopt(long, env = "LFS_S3_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Address buckets as `endpoint/bucket` rather than `bucket.endpoint`
    #[structopt(long)]
    pub force_path_style: bool,
}

impl Opt {
    pub fn s3_config(&self) -> S3Config {
        S3Config {
            bucket: self.bucket.clone(),
            prefix: self.prefix.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            force_path_style: self.force_path_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Options left off the command line may still be filled from `LFS_*` or
    // `AWS_REGION`, so only the ones passed here are asserted.
    #[test]
    fn parses_arguments() {
        let opt = Opt::from_iter_safe(&[
            "git-lfs-server",
            "--secret",
            "s3cr3t",
            "--bucket",
            "lfs-objects",
            "--public-url",
            "https://lfs.example.com/",
            "--prefix",
            "repos",
            "--bind",
            "0.0.0.0:8080",
            "--force-path-style",
        ])
        .unwrap();

        assert_eq!(opt.bind, "0.0.0.0:8080");
        assert_eq!(opt.secret, "s3cr3t");
        assert_eq!(
            opt.public_url,
            Some("https://lfs.example.com/".parse().unwrap())
        );
        let s3 = opt.s3_config();
        assert_eq!(s3.bucket, "lfs-objects");
        assert_eq!(s3.prefix.as_deref(), Some("repos"));
        assert!(s3.force_path_style);
    }

    #[test]
    fn rejects_non_http_public_url() {
        assert!(Opt::from_iter_safe(&[
            "git-lfs-server",
            "--secret",
            "s3cr3t",
            "--bucket",
            "lfs-objects",
            "--public-url",
            "ftp://lfs.example.com/",
        ])
        .is_err());
    }
}
