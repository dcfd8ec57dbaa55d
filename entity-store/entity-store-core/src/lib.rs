pub mod accessor;
pub mod path;
pub mod service;
pub mod storage;

pub use accessor::Presence;
pub use path::{DocPath, EntityId, InvalidId};
pub use service::{DocumentService, ServiceError};
pub use storage::{DocumentStore, FileStore, MemoryStore, StoreError};
