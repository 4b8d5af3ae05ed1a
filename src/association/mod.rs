//! Scan-to-associate state machine.

mod failure;
mod flow;
mod payload;

pub use failure::AssociationFailure;
pub use flow::{AssociationState, DeviceAssociationFlow, ScanOutcome};
pub use payload::parse_scan_payload;
