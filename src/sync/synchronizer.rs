use crate::error::ClientError;
use crate::quality::ListSummary;
use crate::types::{Device, EnrichedDevice, Measurement};
use crate::weekly::WeeklyWindow;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{DeviceBackend, FavoriteDiscipline, ListScope};

/// Committed state of one list.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshot {
    devices: Vec<EnrichedDevice>,
    /// Highest load sequence whose result may no longer be overwritten by an older one.
    watermark: u64,
}

impl ListSnapshot {
    pub fn devices(&self) -> &[EnrichedDevice] {
        &self.devices
    }

    pub fn get(&self, device_id: &str) -> Option<&EnrichedDevice> {
        self.devices.iter().find(|d| d.id() == device_id)
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary::from_devices(&self.devices)
    }

    fn position(&self, device_id: &str) -> Option<usize> {
        self.devices.iter().position(|d| d.id() == device_id)
    }
}

/// Keeps one screen's device list in step with the backend.
///
/// Loads are numbered; a finished load only replaces the list when its number is above the
/// watermark, so the most recently issued load always wins over a slower older one. Optimistic
/// mutations raise the watermark to the last issued number, which keeps loads started before the
/// mutation from bringing back the pre-mutation state.
pub struct ResourceSynchronizer<B: ?Sized> {
    backend: Arc<B>,
    scope: ListScope,
    discipline: FavoriteDiscipline,
    issued: AtomicU64,
    state: watch::Sender<ListSnapshot>,
}

impl<B: DeviceBackend + ?Sized> ResourceSynchronizer<B> {
    pub fn new(backend: Arc<B>, scope: ListScope) -> Self {
        let discipline = scope.default_discipline();
        let (state, _) = watch::channel(ListSnapshot::default());
        Self {
            backend,
            scope,
            discipline,
            issued: AtomicU64::new(0),
            state,
        }
    }

    #[must_use]
    pub fn with_discipline(mut self, discipline: FavoriteDiscipline) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn scope(&self) -> &ListScope {
        &self.scope
    }

    pub fn discipline(&self) -> FavoriteDiscipline {
        self.discipline
    }

    /// Currently committed list.
    pub fn devices(&self) -> Vec<EnrichedDevice> {
        self.state.borrow().devices.clone()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state.borrow().clone()
    }

    pub fn summary(&self) -> ListSummary {
        self.state.borrow().summary()
    }

    /// Receiver notified on every commit and optimistic mutation.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.state.subscribe()
    }

    /// Re-synchronizes when the screen regains focus. This is the only automatic refresh.
    pub async fn on_focus(&self) -> Vec<EnrichedDevice> {
        debug!(scope = self.scope.name(), "Screen focused; reloading");
        self.load().await
    }

    /// Fetches the devices, joins each with its latest measurement and commits the result
    /// unless a more recent load has already been committed.
    ///
    /// Never fails: a failed device fetch yields an empty list, and a failed measurement fetch
    /// yields the zero measurement for that device only. Returns the committed list.
    pub async fn load(&self) -> Vec<EnrichedDevice> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let scope = self.scope.name();

        let devices = match self.backend.list_devices().await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(scope, seq, error = %e, "Device fetch failed; committing an empty list");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let devices: Vec<Device> = devices
            .into_iter()
            .filter(|d| seen.insert(d.id.clone()))
            .filter(|d| self.scope.includes(d))
            .collect();

        let enriched = join_all(devices.into_iter().map(|device| async move {
            let measurement = match self.backend.latest_measurement(&device.id).await {
                Ok(measurement) => measurement,
                Err(e) => {
                    warn!(
                        scope,
                        device_id = %device.id,
                        error = %e,
                        "Measurement fetch failed; using zero measurement"
                    );
                    Measurement::default()
                }
            };
            EnrichedDevice::new(device, measurement)
        }))
        .await;

        let count = enriched.len();
        let committed = self.state.send_if_modified(|state| {
            if seq <= state.watermark {
                return false;
            }
            state.watermark = seq;
            state.devices = enriched;
            true
        });

        if committed {
            info!(scope, seq, devices = count, "Device list committed");
        } else {
            debug!(scope, seq, "Superseded load discarded");
        }
        self.devices()
    }

    /// Toggles the favorite flag, updating the list before the backend answers.
    ///
    /// Under [`FavoriteDiscipline::FlipAndRevert`] a failure restores the flag captured before
    /// the flip. Under [`FavoriteDiscipline::RemoveOptimistically`] a device that no longer
    /// belongs to the scope is dropped and stays dropped, whatever the outcome.
    pub async fn toggle_favorite(&self, device_id: &str) -> Result<(), ClientError> {
        let watermark = self.issued.load(Ordering::SeqCst);
        let discipline = self.discipline;
        let mut prior: Option<EnrichedDevice> = None;

        self.state.send_if_modified(|state| {
            let Some(idx) = state.position(device_id) else {
                return false;
            };
            state.watermark = state.watermark.max(watermark);

            let mut flipped = state.devices[idx].clone();
            flipped.device.favorite = !flipped.device.favorite;
            let drop_it = discipline == FavoriteDiscipline::RemoveOptimistically
                && !self.scope.includes(&flipped.device);

            let previous = if drop_it {
                state.devices.remove(idx)
            } else {
                std::mem::replace(&mut state.devices[idx], flipped)
            };
            prior = Some(previous);
            true
        });

        let Some(prior) = prior else {
            return Err(ClientError::not_in_list(device_id));
        };
        let favorite = !prior.device.favorite;

        match self.backend.set_favorite(device_id, favorite).await {
            Ok(()) => {
                info!(device_id, favorite, "Favorite updated");
                Ok(())
            }
            Err(e) => {
                match discipline {
                    FavoriteDiscipline::FlipAndRevert => {
                        self.restore_favorite(device_id, prior.device.favorite);
                        warn!(device_id, error = %e, "Favorite update failed; reverted");
                    }
                    FavoriteDiscipline::RemoveOptimistically => {
                        warn!(
                            device_id,
                            error = %e,
                            "Favorite update failed; list corrects on next load"
                        );
                    }
                }
                Err(e)
            }
        }
    }

    /// Removes a device, dropping it from the list first. On failure the captured entry is put
    /// back at its old position and the error returned; callers then reload.
    pub async fn remove(&self, device_id: &str) -> Result<(), ClientError> {
        let watermark = self.issued.load(Ordering::SeqCst);
        let mut removed: Option<(usize, EnrichedDevice)> = None;

        self.state.send_if_modified(|state| {
            let Some(idx) = state.position(device_id) else {
                return false;
            };
            state.watermark = state.watermark.max(watermark);
            removed = Some((idx, state.devices.remove(idx)));
            true
        });

        let Some((idx, entry)) = removed else {
            return Err(ClientError::not_in_list(device_id));
        };

        match self.backend.remove(device_id).await {
            Ok(()) => {
                info!(device_id, "Device removed");
                Ok(())
            }
            Err(e) => {
                self.state.send_if_modified(|state| {
                    if state.position(device_id).is_some() {
                        return false;
                    }
                    let at = idx.min(state.devices.len());
                    state.devices.insert(at, entry);
                    true
                });
                warn!(device_id, error = %e, "Device removal failed; entry restored");
                Err(e)
            }
        }
    }

    /// Associates a device, showing a placeholder entry until the backend confirms.
    ///
    /// The placeholder carries only the id; a later [`load`](Self::load) fills in the real
    /// record. On failure the placeholder is withdrawn and the error returned.
    pub async fn associate(&self, device_id: &str) -> Result<(), ClientError> {
        let watermark = self.issued.load(Ordering::SeqCst);
        let placeholder = EnrichedDevice::new(Device::placeholder(device_id), Measurement::default());
        let show_placeholder = self.scope.includes(&placeholder.device);

        let inserted = self.state.send_if_modified(|state| {
            if !show_placeholder || state.position(device_id).is_some() {
                return false;
            }
            state.watermark = state.watermark.max(watermark);
            state.devices.push(placeholder.clone());
            true
        });

        match self.backend.associate(device_id).await {
            Ok(()) => {
                info!(device_id, "Device associated");
                Ok(())
            }
            Err(e) => {
                if inserted {
                    self.state.send_if_modified(|state| {
                        match state.position(device_id) {
                            Some(idx) if state.devices[idx] == placeholder => {
                                state.devices.remove(idx);
                                true
                            }
                            _ => false,
                        }
                    });
                }
                warn!(device_id, error = %e, "Device association failed");
                Err(e)
            }
        }
    }

    /// Weekly averages of one device, wrapped in a window starting at the first day.
    pub async fn weekly_window(&self, device_id: &str) -> Result<WeeklyWindow, ClientError> {
        let entries = self.backend.weekly_averages(device_id).await?;
        debug!(device_id, entries = entries.len(), "Weekly averages fetched");
        Ok(WeeklyWindow::new(entries))
    }

    fn restore_favorite(&self, device_id: &str, favorite: bool) {
        self.state.send_if_modified(|state| match state.position(device_id) {
            Some(idx) if state.devices[idx].device.favorite != favorite => {
                state.devices[idx].device.favorite = favorite;
                true
            }
            _ => false,
        });
    }
}
