mod backend;
mod call;

pub use backend::{BackendApi, build_http_client};
pub use call::ApiCall;
