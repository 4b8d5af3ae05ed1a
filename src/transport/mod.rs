mod authorized;
mod policy;

pub use authorized::AuthorizedTransport;
pub use policy::{
    ERROR_BODY_PREVIEW_CHARS, classify_login_status, classify_reqwest_error, classify_status,
    read_error_response,
};
