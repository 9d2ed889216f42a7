pub mod error;
pub mod sqlite_store;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use sqlite_store::SqliteLearnStore;
pub use store::{InMemoryLearnStore, LearnStore};
pub use types::LearnedItem;
