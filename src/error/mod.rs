mod client;
mod store;

pub use client::{ClientError, ErrorKind};
pub use store::StoreError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
