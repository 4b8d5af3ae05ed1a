use crate::api::ApiCall;
use crate::error::ClientError;
use crate::transport::AuthorizedTransport;
use crate::types::{Device, Measurement, WeeklyAverageEntry};
use aquasync_schema::{DeviceBody, MeasurementBody, WeeklyAverageBody};
use async_trait::async_trait;

/// Device-related backend operations the synchronizer and association flow depend on.
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    async fn list_devices(&self) -> Result<Vec<Device>, ClientError>;

    async fn latest_measurement(&self, device_id: &str) -> Result<Measurement, ClientError>;

    async fn weekly_averages(&self, device_id: &str)
    -> Result<Vec<WeeklyAverageEntry>, ClientError>;

    async fn set_favorite(&self, device_id: &str, favorite: bool) -> Result<(), ClientError>;

    async fn associate(&self, device_id: &str) -> Result<(), ClientError>;

    async fn remove(&self, device_id: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl DeviceBackend for AuthorizedTransport {
    async fn list_devices(&self) -> Result<Vec<Device>, ClientError> {
        let bodies: Vec<DeviceBody> = self.fetch_json(&ApiCall::ListDevices).await?;
        Ok(bodies.into_iter().map(Device::from).collect())
    }

    async fn latest_measurement(&self, device_id: &str) -> Result<Measurement, ClientError> {
        let body: MeasurementBody = self
            .fetch_json(&ApiCall::LatestMeasurement {
                device_id: device_id.to_string(),
            })
            .await?;
        Ok(body.into())
    }

    async fn weekly_averages(
        &self,
        device_id: &str,
    ) -> Result<Vec<WeeklyAverageEntry>, ClientError> {
        let bodies: Vec<WeeklyAverageBody> = self
            .fetch_json(&ApiCall::WeeklyAverages {
                device_id: device_id.to_string(),
            })
            .await?;
        Ok(bodies.into_iter().map(WeeklyAverageEntry::from).collect())
    }

    async fn set_favorite(&self, device_id: &str, favorite: bool) -> Result<(), ClientError> {
        self.send(&ApiCall::SetFavorite {
            device_id: device_id.to_string(),
            favorite,
        })
        .await
    }

    async fn associate(&self, device_id: &str) -> Result<(), ClientError> {
        self.send(&ApiCall::Associate {
            device_id: device_id.to_string(),
        })
        .await
    }

    async fn remove(&self, device_id: &str) -> Result<(), ClientError> {
        self.send(&ApiCall::RemoveDevice {
            device_id: device_id.to_string(),
        })
        .await
    }
}
