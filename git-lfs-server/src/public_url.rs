use std::str::FromStr;
use url::Url;

use crate::error::PublicUrlError;

/// Externally visible base url of this server, used to build verify callback links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrl(Url);

impl PublicUrl {
    /// Derives the base url from how the client reached us.
    pub fn from_connection(scheme: &str, host: &str) -> Result<Self, PublicUrlError> {
        format!("{}://{}/", scheme, host).parse()
    }

    /// `{base}/verify?h={token}`
    pub fn verify_link(&self, token: &str) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("verify");
        }
        url.set_query(None);
        url.query_pairs_mut().append_pair("h", token);
        url
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl FromStr for PublicUrl {
    type Err = PublicUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(s)?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(PublicUrlError::Scheme(other.to_string())),
        }
    }
}
