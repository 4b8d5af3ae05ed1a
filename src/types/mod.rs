mod device;
mod measurement;
mod session;

pub use device::{Device, EnrichedDevice};
pub use measurement::{Measurement, WeeklyAverageEntry};
pub use session::Session;
