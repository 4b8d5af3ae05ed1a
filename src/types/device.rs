use aquasync_schema::DeviceBody;
use serde::{Deserialize, Serialize};

use super::Measurement;
use crate::quality::QualityReport;

/// Read replica of a server-owned device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub title: String,
    pub location: String,
    pub favorite: bool,
    pub connected: bool,
}

impl From<DeviceBody> for Device {
    fn from(body: DeviceBody) -> Self {
        Self {
            id: body.id,
            title: body.title,
            location: body.location,
            favorite: body.favorite,
            connected: body.connected,
        }
    }
}

impl Device {
    /// Stand-in shown while an association is being confirmed.
    pub(crate) fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Case-insensitive substring match over title and location.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.location.to_lowercase().contains(&needle)
    }
}

/// A device joined with its latest measurement. Computed per load, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDevice {
    pub device: Device,
    pub measurement: Measurement,
    pub quality: QualityReport,
}

impl EnrichedDevice {
    pub fn new(device: Device, measurement: Measurement) -> Self {
        let quality = measurement.quality();
        Self {
            device,
            measurement,
            quality,
        }
    }

    pub fn id(&self) -> &str {
        &self.device.id
    }
}
