use crate::error::ClientError;
use crate::sync::{DeviceBackend, ResourceSynchronizer};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{AssociationFailure, parse_scan_payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationState {
    Idle,
    Scanning,
    Validating,
    Associating { device_id: String },
    Success { device_id: String },
    Failed(AssociationFailure),
}

/// What a single scan event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The flow was not scanning; the event was dropped.
    Ignored,
    Associated { device_id: String },
    Failed(AssociationFailure),
}

/// Drives one scan-to-associate interaction.
///
/// Only a scan received while in [`AssociationState::Scanning`] is processed; the state leaves
/// `Scanning` atomically on acceptance, so duplicate scans of the same code are ignored.
pub struct DeviceAssociationFlow<B: ?Sized> {
    backend: Arc<B>,
    state: watch::Sender<AssociationState>,
}

impl<B: DeviceBackend + ?Sized> DeviceAssociationFlow<B> {
    pub fn new(backend: Arc<B>) -> Self {
        let (state, _) = watch::channel(AssociationState::Idle);
        Self { backend, state }
    }

    pub fn state(&self) -> AssociationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AssociationState> {
        self.state.subscribe()
    }

    /// Arms the scanner. Has no effect while a scan is being processed.
    pub fn start_scanning(&self) {
        self.state.send_if_modified(|state| match state {
            AssociationState::Idle
            | AssociationState::Success { .. }
            | AssociationState::Failed(_) => {
                *state = AssociationState::Scanning;
                true
            }
            _ => false,
        });
    }

    /// Leaves a terminal state: `Failed` re-arms the scanner, `Success` returns to idle.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|state| match state {
            AssociationState::Failed(_) => {
                *state = AssociationState::Scanning;
                true
            }
            AssociationState::Success { .. } => {
                *state = AssociationState::Idle;
                true
            }
            _ => false,
        });
    }

    /// Validates a scanned code and associates the device it names.
    pub async fn on_scan(&self, raw: &str) -> ScanOutcome {
        self.process(raw, |device_id| async move {
            self.backend.associate(&device_id).await
        })
        .await
    }

    /// Like [`on_scan`](Self::on_scan), but associates through the given list so the device shows
    /// up optimistically, and reloads that list once the association is confirmed.
    pub async fn on_scan_and_refresh(
        &self,
        raw: &str,
        list: &ResourceSynchronizer<B>,
    ) -> ScanOutcome {
        let outcome = self
            .process(raw, |device_id| async move { list.associate(&device_id).await })
            .await;
        if matches!(outcome, ScanOutcome::Associated { .. }) {
            list.load().await;
        }
        outcome
    }

    async fn process<F, Fut>(&self, raw: &str, associate: F) -> ScanOutcome
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<(), ClientError>>,
    {
        let accepted = self.state.send_if_modified(|state| {
            if *state != AssociationState::Scanning {
                return false;
            }
            *state = AssociationState::Validating;
            true
        });
        if !accepted {
            debug!("Scan ignored; not scanning");
            return ScanOutcome::Ignored;
        }

        let device_id = match parse_scan_payload(raw) {
            Ok(device_id) => device_id,
            Err(failure) => {
                warn!(error = %failure, "Scanned code rejected");
                return self.fail(failure);
            }
        };

        self.state.send_replace(AssociationState::Associating {
            device_id: device_id.clone(),
        });

        match associate(device_id.clone()).await {
            Ok(()) => {
                info!(%device_id, "Association succeeded");
                self.state.send_replace(AssociationState::Success {
                    device_id: device_id.clone(),
                });
                ScanOutcome::Associated { device_id }
            }
            Err(e) => {
                warn!(%device_id, error = %e, "Association failed");
                self.fail(AssociationFailure::from(e))
            }
        }
    }

    fn fail(&self, failure: AssociationFailure) -> ScanOutcome {
        self.state
            .send_replace(AssociationState::Failed(failure.clone()));
        ScanOutcome::Failed(failure)
    }
}
