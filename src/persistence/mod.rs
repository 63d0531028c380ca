//! Save documents and the stores they are written to.

pub mod save;
pub mod store;

pub use save::{decode_save, PersistenceError, PersistenceGateway, SaveSnapshot};
pub use store::{CloudStore, FileStore, MemoryStore, StoreError};
