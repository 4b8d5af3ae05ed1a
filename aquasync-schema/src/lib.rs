pub mod device;
pub mod error;
pub mod lax;
pub mod measurement;
pub mod session;

pub use device::{AssociateRequest, DeviceBody, FavoriteRequest, ScanPayload};
pub use error::BackendErrorBody;
pub use measurement::{MeasurementBody, WeeklyAverageBody};
pub use session::{
    LoginRequest, LoginResponse, PasswordResetRequest, PushTokenRequest, RegisterRequest,
    TokenBody, UserBody,
};
