//! Process-local storage backend.
//!
//! Used when `STORAGE_BACKEND=memory` and by the API integration tests.
//! Everything is lost on restart.

mod store;

#[cfg(test)]
mod tests;

pub use store::InMemoryStore;
