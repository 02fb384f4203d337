#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    AVATAR_KEY, InMemoryStore, KeyValueStore, PROGRESS_KEY, Storage, StorageError,
};
