//! Loose object decoding for lodex.
//!
//! An inflated record is `<type> <size>\0<body>`. Decoding runs in three
//! steps:
//!
//! 1. [`parse_header`] splits off the type tag and declared size.
//! 2. [`dispatch`] hands the body to exactly one body decoder.
//! 3. The body decoder builds a [`Blob`], [`Tree`], [`Commit`] or [`Tag`].
//!
//! A commit names a tree; the commit decoder resolves it through a
//! [`TreeResolver`] and embeds the decoded tree (one level, no recursion into
//! subtrees). [`ObjectDecoder`] wires all of this to an
//! [`ObjectStore`](lodex_store::ObjectStore).
//!
//! # Error policy
//!
//! Every failure aborts the decode call; there are no partial results and no
//! retries. Size mismatches follow [`DecoderConfig::size_policy`].
//!
//! ```
//! use lodex_object::ObjectDecoder;
//! use lodex_store::InMemoryObjectStore;
//! use lodex_types::ObjectId;
//!
//! let store = InMemoryObjectStore::new();
//! let id = ObjectId::from_raw([1; 20]);
//! store.insert(id, b"blob 5\0hello").unwrap();
//!
//! let decoded = ObjectDecoder::new(&store).decode(&id).unwrap();
//! assert_eq!(decoded.size(), 5);
//! assert_eq!(decoded.object.as_blob().unwrap().data, b"hello");
//! ```

pub mod blob;
pub mod commit;
pub mod config;
pub mod decode;
pub mod error;
mod fields;
pub mod header;
pub mod object;
pub mod person;
pub mod tag;
pub mod tree;

pub use blob::{decode_blob, Blob};
pub use commit::{decode_commit, Commit};
pub use config::{DecoderConfig, SizePolicy};
pub use decode::{check_size, decode_object, dispatch, ObjectDecoder, TreeResolver};
pub use error::{DecodeError, DecodeResult};
pub use header::{parse_header, Header};
pub use object::{DecodedObject, Object};
pub use person::Person;
pub use tag::{decode_tag, Tag};
pub use tree::{decode_tree, EntryKind, Tree, TreeEntry};
