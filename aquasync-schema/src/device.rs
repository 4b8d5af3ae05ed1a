use serde::{Deserialize, Serialize};

use crate::lax::{null_as_default, opt_string_or_number, string_or_number};

/// A device as listed by `GET devices`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceBody {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favorite: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connected: bool,
}

/// Body of `PATCH devices/{id}/favorite`.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteRequest {
    pub favorite: bool,
}

/// Body of `POST devices/associate`.
#[derive(Debug, Clone, Serialize)]
pub struct AssociateRequest {
    #[serde(rename = "deviceId")]
    pub device_id: String,
}

/// JSON object encoded in a device's scannable code.
///
/// `deviceId` is canonical; `device_id` and `id` are accepted from older labels. A code may carry
/// several of them, so each key is read on its own.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ScanPayload {
    #[serde(rename = "deviceId", default, deserialize_with = "opt_string_or_number")]
    pub device_id: Option<String>,
    #[serde(rename = "device_id", default, deserialize_with = "opt_string_or_number")]
    pub legacy_device_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
}

impl ScanPayload {
    /// First identifier present, in the order `deviceId`, `device_id`, `id`.
    pub fn identifier(&self) -> Option<&str> {
        self.device_id
            .as_deref()
            .or(self.legacy_device_id.as_deref())
            .or(self.id.as_deref())
    }
}
