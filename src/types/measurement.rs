use aquasync_schema::{MeasurementBody, WeeklyAverageBody};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quality::QualityReport;

/// Latest measurement snapshot of one device. `Default` is the all-zero fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub ph: f64,
    pub temperature: f64,
    pub turbidity: f64,
    pub tds: f64,
    pub average_measurement: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<MeasurementBody> for Measurement {
    fn from(body: MeasurementBody) -> Self {
        Self {
            ph: body.ph,
            temperature: body.temperature,
            turbidity: body.turbidity,
            tds: body.tds,
            average_measurement: body.average_measurement,
            created_at: body.created_at,
        }
    }
}

impl Measurement {
    pub fn quality(&self) -> QualityReport {
        QualityReport::from_readings(
            self.ph,
            self.temperature,
            self.turbidity,
            self.average_measurement,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAverageEntry {
    pub day: String,
    pub average_measurement: f64,
}

impl From<WeeklyAverageBody> for WeeklyAverageEntry {
    fn from(body: WeeklyAverageBody) -> Self {
        Self {
            day: body.day,
            average_measurement: body.average_measurement,
        }
    }
}
