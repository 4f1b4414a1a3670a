//! Loose object storage for lodex.
//!
//! This crate is the store locator of the decoding pipeline: given an
//! [`ObjectId`](lodex_types::ObjectId) it produces the fully inflated bytes of
//! the record that identifier names. It never interprets those bytes.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`LooseObjectStore`] -- reads `<root>/<xx>/<rest>` zlib streams from disk
//! - [`InMemoryObjectStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The store is read-only from the decoder's point of view.
//! 2. No caching: every read re-reads and re-inflates from scratch.
//! 3. Absence is `Ok(None)` from [`ObjectStore::read`] and
//!    [`StoreError::NotFound`] from [`ObjectStore::locate`].
//! 4. All I/O and inflate errors are propagated, never silently ignored.

pub mod config;
pub mod error;
pub mod loose;
pub mod memory;
pub mod traits;
pub mod zlib;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use loose::LooseObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;
