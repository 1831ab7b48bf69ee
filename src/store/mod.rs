//! Session store: persistence, change notification and cross-process sync.

mod error;
mod observer;
mod storage;
#[allow(clippy::module_inception)]
mod store;

pub use error::{StorageError, StoreError};
pub use observer::{SubscriptionId, Subscribers};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::Store;
