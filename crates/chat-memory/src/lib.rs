//! Client for the hosted memory service.

#[cfg(feature = "test-util")]
pub mod mock;
mod remote;

pub use chat_types::{MemoryAck, MemoryStore, MemoryStoreError, SearchResult};
pub use remote::{MemoryServiceConfig, RemoteMemoryStore};

#[cfg(feature = "test-util")]
pub use mock::MockMemoryStore;
