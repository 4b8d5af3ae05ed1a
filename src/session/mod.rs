mod account;
mod push;
mod storage;
mod store;

pub use account::AccountApi;
pub use push::{NoopPushRegistrar, PushRegistrar};
pub use storage::{MemoryStorage, SESSION_STORAGE_KEY, SessionStorage, TOKEN_STORAGE_KEY};
pub use store::SessionStore;
