//! Local durable storage: a SQLite key/value table owned by a single actor.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database
//! - `actor.rs`: the storage actor and its cloneable handle

pub mod actor;
pub mod schema;

pub use actor::{DbActorHandle, spawn};
pub use schema::SQLITE_INIT;
