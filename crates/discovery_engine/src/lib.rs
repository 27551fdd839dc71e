//! Discovery engine: backend gateway, durable stores and the session driver.
mod feedback;
mod gateway;
mod kv;
mod persist;
mod preference_store;
mod session;
mod starred_store;
mod types;

pub use feedback::{FeedbackDispatcher, FeedbackError};
pub use gateway::{ApiGateway, GatewaySettings, ReqwestGateway};
pub use kv::{keys, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use persist::{ensure_state_dir, AtomicFile, PersistError};
pub use preference_store::PreferenceStore;
pub use session::SessionEngine;
pub use starred_store::StarredStore;
pub use types::{FailureKind, GatewayError};

pub use discovery_core::{
    FeedbackEvent, FeedbackKind, Phase, Preferences, Project, SessionView, TagSet,
};
