use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::spec::Object;

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#requests
#[derive(PartialEq, Eq, Debug, Deserialize)]
pub struct BatchRequest {
    pub operation: Operation,
    #[serde(default = "Transfer::default_vec")]
    pub transfers: Vec<Transfer>,
    #[serde(rename = "ref")]
    pub ref_property: Option<Ref>,
    pub objects: Vec<Object>,
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#successful-responses
#[derive(PartialEq, Eq, Debug, Serialize)]
pub struct BatchResponse {
    pub transfer: Transfer,
    pub objects: Vec<ObjectResponse>,
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#requests
#[derive(PartialEq, Eq, Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Download,
    Upload,
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/basic-transfers.md#basic-transfer-api
///
/// Only the basic adapter is understood. Any other adapter a client advertises
/// is read as [`Transfer::Other`] so that the request still parses.
#[derive(PartialEq, Eq, Debug, Deserialize, Serialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    #[default]
    Basic,
    #[serde(other, skip_serializing)]
    Other,
}

impl Transfer {
    fn default_vec() -> Vec<Self> {
        vec![Transfer::Basic]
    }
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#ref-property
#[derive(PartialEq, Eq, Debug, Deserialize)]
pub struct Ref {
    pub name: String,
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#successful-responses
///
/// Every object in a response carries either an `actions` map, an `error`, or
/// neither when the server has nothing for the client to do. It never carries both.
#[derive(PartialEq, Eq, Debug)]
pub struct ObjectResponse {
    pub object: Object,
    pub authenticated: Option<bool>,
    pub outcome: ObjectOutcome,
}

#[derive(PartialEq, Eq, Debug)]
pub enum ObjectOutcome {
    Actions(Actions),
    /// Serialized without an `actions` key, e.g. an upload of an object the server already has.
    NothingToDo,
    Error(ObjectError),
}

impl ObjectResponse {
    pub fn success(object: Object, actions: Actions) -> Self {
        Self {
            object,
            authenticated: Some(true),
            outcome: ObjectOutcome::Actions(actions),
        }
    }

    pub fn nothing_to_do(object: Object) -> Self {
        Self {
            object,
            authenticated: Some(true),
            outcome: ObjectOutcome::NothingToDo,
        }
    }

    pub fn error(object: Object, error: ObjectError) -> Self {
        Self {
            object,
            authenticated: Some(true),
            outcome: ObjectOutcome::Error(error),
        }
    }
}

impl Serialize for ObjectResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("oid", &self.object.oid)?;
        map.serialize_entry("size", &self.object.size)?;
        if let Some(authenticated) = self.authenticated {
            map.serialize_entry("authenticated", &authenticated)?;
        }
        match &self.outcome {
            ObjectOutcome::Actions(actions) => map.serialize_entry("actions", actions)?,
            ObjectOutcome::NothingToDo => {}
            ObjectOutcome::Error(error) => map.serialize_entry("error", error)?,
        }
        map.end()
    }
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#response-errors
#[derive(PartialEq, Eq, Debug, Serialize, Clone, Copy)]
pub struct ObjectError {
    pub code: u16,
    pub message: &'static str,
}

impl ObjectError {
    pub const DOES_NOT_EXIST: Self = Self {
        code: 404u16,
        message: "object does not exist",
    };
    pub const VALIDATION_ERROR: Self = Self {
        code: 422u16,
        message: "Validation error",
    };
    pub const INTERNAL_ERROR: Self = Self {
        code: 500u16,
        message: "Internal server error",
    };
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/basic-transfers.md#basic-transfer-api
#[derive(PartialEq, Eq, Debug, Serialize)]
#[serde(untagged)]
pub enum Actions {
    Download { download: Action },
    UploadAndVerify { upload: Action, verify: Action },
}

impl Actions {
    pub fn download(download: Action) -> Self {
        Actions::Download { download }
    }

    pub fn upload_and_verify(upload: Action, verify: Action) -> Self {
        Actions::UploadAndVerify { upload, verify }
    }
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/basic-transfers.md#basic-transfer-api
#[derive(PartialEq, Eq, Debug, Serialize)]
pub struct Action {
    pub href: Url,
    pub header: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Action {
    pub fn new(href: Url) -> Self {
        Self {
            href,
            header: HashMap::new(),
            expires_in: None,
            expires_at: None,
        }
    }

    pub fn expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = Some(seconds);
        self
    }
}

/// https://github.com/git-lfs/git-lfs/blob/main/docs/api/batch.md#response-errors
#[derive(PartialEq, Eq, Debug, Serialize)]
pub struct LfsErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl LfsErrorResponse {
    /// The request body could not be understood.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            documentation_url: None,
            request_id: None,
        }
    }
}
