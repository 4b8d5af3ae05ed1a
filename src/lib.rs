pub mod api;
pub mod association;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod quality;
pub mod session;
pub mod sync;
pub mod transport;
pub mod types;
pub mod weekly;

mod utils;

pub use client::AquaClient;
pub use error::{ClientError, ErrorKind};
