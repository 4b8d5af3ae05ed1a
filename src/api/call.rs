use aquasync_schema::{
    AssociateRequest, FavoriteRequest, LoginRequest, PasswordResetRequest, PushTokenRequest,
    RegisterRequest,
};
use reqwest::Method;

/// Every backend endpoint the client talks to.
#[derive(Debug, Clone)]
pub enum ApiCall {
    Login(LoginRequest),
    Register(RegisterRequest),
    PasswordReset(PasswordResetRequest),
    PushToken(PushTokenRequest),
    ListDevices,
    LatestMeasurement { device_id: String },
    WeeklyAverages { device_id: String },
    SetFavorite { device_id: String, favorite: bool },
    Associate { device_id: String },
    RemoveDevice { device_id: String },
}

impl ApiCall {
    pub fn method(&self) -> Method {
        match self {
            ApiCall::ListDevices
            | ApiCall::LatestMeasurement { .. }
            | ApiCall::WeeklyAverages { .. } => Method::GET,
            ApiCall::SetFavorite { .. } => Method::PATCH,
            ApiCall::RemoveDevice { .. } => Method::DELETE,
            ApiCall::Login(_)
            | ApiCall::Register(_)
            | ApiCall::PasswordReset(_)
            | ApiCall::PushToken(_)
            | ApiCall::Associate { .. } => Method::POST,
        }
    }

    /// Path segments relative to the configured base URL.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            ApiCall::Login(_) => vec!["sessions"],
            ApiCall::Register(_) => vec!["users"],
            ApiCall::PasswordReset(_) => vec!["users", "forgot-password"],
            ApiCall::PushToken(_) => vec!["users", "push-token"],
            ApiCall::ListDevices => vec!["devices"],
            ApiCall::LatestMeasurement { device_id } => {
                vec!["devices", device_id.as_str(), "measurements", "latest"]
            }
            ApiCall::WeeklyAverages { device_id } => {
                vec!["devices", device_id.as_str(), "measurements", "weekly"]
            }
            ApiCall::SetFavorite { device_id, .. } => vec!["devices", device_id.as_str(), "favorite"],
            ApiCall::Associate { .. } => vec!["devices", "associate"],
            ApiCall::RemoveDevice { device_id } => vec!["devices", device_id.as_str()],
        }
    }

    /// Reads are safe to repeat; anything that mutates server state is sent once.
    pub fn is_idempotent(&self) -> bool {
        self.method() == Method::GET
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::Login(_) => "login",
            ApiCall::Register(_) => "register",
            ApiCall::PasswordReset(_) => "password_reset",
            ApiCall::PushToken(_) => "push_token",
            ApiCall::ListDevices => "list_devices",
            ApiCall::LatestMeasurement { .. } => "latest_measurement",
            ApiCall::WeeklyAverages { .. } => "weekly_averages",
            ApiCall::SetFavorite { .. } => "set_favorite",
            ApiCall::Associate { .. } => "associate",
            ApiCall::RemoveDevice { .. } => "remove_device",
        }
    }

    pub(super) fn attach_body(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            ApiCall::Login(body) => request.json(body),
            ApiCall::Register(body) => request.json(body),
            ApiCall::PasswordReset(body) => request.json(body),
            ApiCall::PushToken(body) => request.json(body),
            ApiCall::SetFavorite { favorite, .. } => request.json(&FavoriteRequest {
                favorite: *favorite,
            }),
            ApiCall::Associate { device_id } => request.json(&AssociateRequest {
                device_id: device_id.clone(),
            }),
            ApiCall::ListDevices
            | ApiCall::LatestMeasurement { .. }
            | ApiCall::WeeklyAverages { .. }
            | ApiCall::RemoveDevice { .. } => request,
        }
    }
}
