// Draft persistence: the key-value store seam and the load/save/clear manager.

pub mod manager;
pub mod store;

pub use manager::{DraftStore, RecoveredDraft};
pub use store::{FileStore, KeyValueStore, MemoryStore};
