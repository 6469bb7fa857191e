pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::errors::AppResult;

/// String-keyed key-value persistence, the only capability the stores
/// need. Injected rather than ambient so tests can substitute an
/// in-memory fake and so a missing state directory degrades to "no
/// persisted data" instead of failing hard.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}
