#![allow(dead_code)]

use aquasync::config::Config;
use aquasync::error::ClientError;
use aquasync::sync::DeviceBackend;
use aquasync::types::{Device, Measurement, WeeklyAverageEntry};
use async_trait::async_trait;
use axum::Router;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use url::Url;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock backend");
    let addr = listener.local_addr().expect("mock backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock backend stopped");
    });
    Url::parse(&format!("http://{addr}/")).expect("invalid mock backend url")
}

/// A base URL nothing listens on.
pub async fn closed_backend() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("invalid closed backend url")
}

pub fn config_for(base_url: Url) -> Config {
    let mut cfg = Config::default();
    cfg.backend.base_url = base_url;
    cfg.backend.timeout_secs = 2;
    cfg.backend.connect_timeout_secs = 1;
    cfg
}

pub fn device(id: &str, favorite: bool) -> Device {
    Device {
        id: id.to_string(),
        title: format!("Tank {id}"),
        location: "Dock".to_string(),
        favorite,
        connected: true,
    }
}

pub fn measurement() -> Measurement {
    Measurement {
        ph: 7.0,
        temperature: 9.0,
        turbidity: 1.0,
        tds: 120.0,
        average_measurement: 12.0,
        created_at: None,
    }
}

/// In-process backend with scriptable delays and failures.
#[derive(Default)]
pub struct FakeBackend {
    devices: Mutex<Vec<Device>>,
    list_script: Mutex<VecDeque<(Duration, Result<Vec<Device>, ClientError>)>>,
    failing_measurements: Mutex<HashSet<String>>,
    measurement_delay: Mutex<Duration>,
    mutation_error: Mutex<Option<ClientError>>,
    mutation_gate: Mutex<Option<Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_devices(devices: Vec<Device>) -> Arc<Self> {
        let backend = Self::default();
        *backend.devices.lock().expect("poisoned") = devices;
        Arc::new(backend)
    }

    /// Queues the outcome of the next un-scripted `list_devices` call.
    pub fn script_list(&self, delay: Duration, result: Result<Vec<Device>, ClientError>) {
        self.list_script
            .lock()
            .expect("poisoned")
            .push_back((delay, result));
    }

    pub fn fail_measurement(&self, device_id: &str) {
        self.failing_measurements
            .lock()
            .expect("poisoned")
            .insert(device_id.to_string());
    }

    /// Delays every measurement answer, so overlapping fetches are observable.
    pub fn delay_measurements(&self, delay: Duration) {
        *self.measurement_delay.lock().expect("poisoned") = delay;
    }

    pub fn fail_mutations(&self, err: ClientError) {
        *self.mutation_error.lock().expect("poisoned") = Some(err);
    }

    /// Makes every mutation wait until the returned gate is notified.
    pub fn hold_mutations(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.mutation_gate.lock().expect("poisoned") = Some(gate.clone());
        gate
    }

    pub fn set_devices(&self, devices: Vec<Device>) {
        *self.devices.lock().expect("poisoned") = devices;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("poisoned").clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("poisoned").push(call);
    }

    async fn mutation(&self) -> Result<(), ClientError> {
        let gate = self.mutation_gate.lock().expect("poisoned").clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.mutation_error.lock().expect("poisoned").clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DeviceBackend for FakeBackend {
    async fn list_devices(&self) -> Result<Vec<Device>, ClientError> {
        self.record("list".to_string());
        let scripted = self.list_script.lock().expect("poisoned").pop_front();
        match scripted {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(self.devices.lock().expect("poisoned").clone()),
        }
    }

    async fn latest_measurement(&self, device_id: &str) -> Result<Measurement, ClientError> {
        self.record(format!("measurement:{device_id}"));
        let delay = *self.measurement_delay.lock().expect("poisoned");
        tokio::time::sleep(delay).await;
        if self
            .failing_measurements
            .lock()
            .expect("poisoned")
            .contains(device_id)
        {
            return Err(ClientError::Connectivity("measurement timed out".to_string()));
        }
        Ok(measurement())
    }

    async fn weekly_averages(
        &self,
        device_id: &str,
    ) -> Result<Vec<WeeklyAverageEntry>, ClientError> {
        self.record(format!("weekly:{device_id}"));
        Ok(["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
            .iter()
            .zip([4.0, 8.0, 10.0, 10.5, 12.0, 2.0, 14.0])
            .map(|(day, average_measurement)| WeeklyAverageEntry {
                day: (*day).to_string(),
                average_measurement,
            })
            .collect())
    }

    async fn set_favorite(&self, device_id: &str, favorite: bool) -> Result<(), ClientError> {
        self.record(format!("favorite:{device_id}:{favorite}"));
        self.mutation().await
    }

    async fn associate(&self, device_id: &str) -> Result<(), ClientError> {
        self.record(format!("associate:{device_id}"));
        self.mutation().await?;
        self.devices
            .lock()
            .expect("poisoned")
            .push(device(device_id, false));
        Ok(())
    }

    async fn remove(&self, device_id: &str) -> Result<(), ClientError> {
        self.record(format!("remove:{device_id}"));
        self.mutation().await?;
        self.devices
            .lock()
            .expect("poisoned")
            .retain(|d| d.id != device_id);
        Ok(())
    }
}
