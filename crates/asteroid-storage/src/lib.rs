//! # asteroid-storage
//!
//! Storage layer for asteroid: a `Store` capability over an append-only,
//! eventually-consistent document log, two backends for it, and the
//! [`DocumentRepository`] that turns the log into "current value of key"
//! semantics.
//!
//! Every write is an append. Reads force a reload of the local view before
//! querying, because the default state of a replica is stale.

#![warn(clippy::all)]

pub mod codec;
pub mod context;
pub mod errors;
pub mod log;
pub mod memory;
pub mod repository;
pub mod rocksdb_impl;
pub mod traits;
pub mod types;

pub use context::{OpContext, DEFAULT_TIMEOUT};
pub use errors::{RepositoryError, Result, StorageError};
pub use memory::MemoryLogStore;
pub use repository::DocumentRepository;
pub use rocksdb_impl::RocksDbLogStore;
pub use traits::Store;
pub use types::{Document, GetOptions, LoadDepth, VersionHandle};
