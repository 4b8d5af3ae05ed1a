//! Device lists kept in step with the backend.

mod backend;
mod scope;
mod synchronizer;

pub use backend::DeviceBackend;
pub use scope::{FavoriteDiscipline, ListScope};
pub use synchronizer::{ListSnapshot, ResourceSynchronizer};
