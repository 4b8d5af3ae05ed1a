use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest measurement snapshot of one device.
///
/// Every numeric field defaults to zero so a partially populated payload still decodes.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementBody {
    #[serde(default)]
    pub ph: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub turbidity: f64,
    #[serde(default)]
    pub tds: f64,
    #[serde(default)]
    pub average_measurement: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One day of the weekly average series.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct WeeklyAverageBody {
    pub day: String,
    #[serde(default)]
    pub average_measurement: f64,
}
