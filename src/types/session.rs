use aquasync_schema::LoginResponse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The authenticated identity and bearer token of the current user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub bearer_token: String,
    pub token_kind: String,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            user_id: resp.user.id,
            display_name: resp.user.name,
            email: resp.user.email,
            bearer_token: resp.token.token,
            token_kind: resp.token.kind,
        }
    }
}

// Keeps the token out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("bearer_token", &"<redacted>")
            .field("token_kind", &self.token_kind)
            .finish()
    }
}
