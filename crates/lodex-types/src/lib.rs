//! Foundation types for lodex.
//!
//! Every other lodex crate depends on `lodex-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- 20-byte content hash naming a stored object
//! - [`ObjectKind`] -- the four record kinds found in a loose object header

pub mod error;
pub mod kind;
pub mod object;

pub use error::TypeError;
pub use kind::ObjectKind;
pub use object::{ObjectId, HEX_LEN, RAW_LEN};
