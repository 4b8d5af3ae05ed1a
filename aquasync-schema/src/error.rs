use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Error payload returned by the backend on non-2xx responses.
///
/// Validation failures come as `{"errors":[{"message":...}]}`, everything else as
/// `{"message":...}`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BackendErrorItem>,

    #[serde(flatten)]
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendErrorItem {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl BackendErrorBody {
    /// First human-readable message carried by the body, if any.
    pub fn first_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| {
                self.errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .find(|m| !m.trim().is_empty())
            })
    }
}
