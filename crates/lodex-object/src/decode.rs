//! Type dispatch and the store-backed decoder.

use lodex_store::ObjectStore;
use lodex_types::{ObjectId, ObjectKind};
use tracing::{debug, warn};

use crate::blob::decode_blob;
use crate::commit::decode_commit;
use crate::config::{DecoderConfig, SizePolicy};
use crate::error::{DecodeError, DecodeResult};
use crate::header::{parse_header, Header};
use crate::object::{DecodedObject, Object};
use crate::tag::decode_tag;
use crate::tree::{decode_tree, Tree};

/// Resolves a tree identifier into a decoded tree.
///
/// The commit decoder receives this capability explicitly, so it can be
/// driven by a real store or by a fake in tests.
pub trait TreeResolver {
    fn resolve_tree(&self, id: &ObjectId) -> DecodeResult<Tree>;
}

/// Enforce `declared_size == body.len()` according to `policy`.
pub fn check_size(header: &Header, body: &[u8], policy: SizePolicy) -> DecodeResult<()> {
    let actual = body.len() as u64;
    if actual == header.declared_size {
        return Ok(());
    }
    match policy {
        SizePolicy::Strict => Err(DecodeError::SizeMismatch {
            kind: header.kind,
            declared: header.declared_size,
            actual,
        }),
        SizePolicy::Warn => {
            warn!(
                kind = %header.kind,
                declared = header.declared_size,
                actual,
                "body size disagrees with header; decoding what is present"
            );
            Ok(())
        }
    }
}

/// Route a body to the decoder for `header.kind`.
///
/// This is the only place a kind is mapped to an [`Object`] variant.
pub fn dispatch(header: &Header, body: &[u8], resolver: &dyn TreeResolver) -> DecodeResult<Object> {
    Ok(match header.kind {
        ObjectKind::Blob => Object::Blob(decode_blob(body)),
        ObjectKind::Tree => Object::Tree(decode_tree(body)?),
        ObjectKind::Commit => Object::Commit(decode_commit(body, resolver)?),
        ObjectKind::Tag => Object::Tag(decode_tag(body)?),
    })
}

/// Decode an inflated record: header, size check, then the body.
pub fn decode_object(
    raw: &[u8],
    resolver: &dyn TreeResolver,
    config: &DecoderConfig,
) -> DecodeResult<DecodedObject> {
    let (header, body) = parse_header(raw)?;
    check_size(&header, body, config.size_policy)?;
    let object = dispatch(&header, body, resolver)?;
    Ok(DecodedObject { header, object })
}

/// Decoder backed by an [`ObjectStore`].
///
/// Each call reads the store afresh; nothing is cached between calls.
#[derive(Debug)]
pub struct ObjectDecoder<S> {
    store: S,
    config: DecoderConfig,
}

impl<S: ObjectStore> ObjectDecoder<S> {
    /// Create a decoder with the default (strict) configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, DecoderConfig::default())
    }

    pub fn with_config(store: S, config: DecoderConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The inflated record for `id`, header included.
    pub fn read_raw(&self, id: &ObjectId) -> DecodeResult<Vec<u8>> {
        Ok(self.store.locate(id)?)
    }

    /// Locate, inflate and decode the object named by `id`.
    pub fn decode(&self, id: &ObjectId) -> DecodeResult<DecodedObject> {
        let raw = self.read_raw(id)?;
        debug!(id = %id, bytes = raw.len(), "decoding object");
        self.decode_raw(&raw)
    }

    /// Decode an inflated record, resolving any commit tree through this
    /// decoder's store.
    pub fn decode_raw(&self, raw: &[u8]) -> DecodeResult<DecodedObject> {
        decode_object(raw, self, &self.config)
    }
}

impl<S: ObjectStore> TreeResolver for ObjectDecoder<S> {
    /// Decodes the tree itself only; its subtrees stay as identifiers.
    fn resolve_tree(&self, id: &ObjectId) -> DecodeResult<Tree> {
        let raw = self.read_raw(id)?;
        let (header, body) = parse_header(&raw)?;
        if header.kind != ObjectKind::Tree {
            return Err(DecodeError::UnexpectedKind {
                id: *id,
                expected: ObjectKind::Tree,
                actual: header.kind,
            });
        }
        check_size(&header, body, self.config.size_policy)?;
        decode_tree(body)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use lodex_store::InMemoryObjectStore;

    /// Resolver that counts how often it is asked for a tree.
    #[derive(Default)]
    struct CountingResolver {
        calls: Cell<usize>,
    }

    impl TreeResolver for CountingResolver {
        fn resolve_tree(&self, _id: &ObjectId) -> DecodeResult<Tree> {
            self.calls.set(self.calls.get() + 1);
            Ok(Tree::default())
        }
    }

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_raw([byte; 20])
    }

    fn tree_record(entries: &[(&str, &str, ObjectId)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (mode, name, id) in entries {
            body.extend_from_slice(format!("{mode} {name}\0").as_bytes());
            body.extend_from_slice(id.as_bytes());
        }
        let mut raw = format!("tree {}\0", body.len()).into_bytes();
        raw.extend(body);
        raw
    }

    fn commit_record(tree: &ObjectId) -> Vec<u8> {
        let body = format!(
            "tree {tree}\nauthor A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\nmsg\n"
        );
        format!("commit {}\0{body}", body.len()).into_bytes()
    }

    #[test]
    fn decodes_blob() {
        let decoded =
            decode_object(b"blob 5\0hello", &CountingResolver::default(), &DecoderConfig::default())
                .unwrap();
        assert_eq!(decoded.kind(), ObjectKind::Blob);
        assert_eq!(decoded.size(), 5);
        assert_eq!(decoded.object.as_blob().unwrap().data, b"hello");
    }

    #[test]
    fn unknown_type_never_reaches_a_body_decoder() {
        let resolver = CountingResolver::default();
        let err = decode_object(b"gizmo 4\0tree", &resolver, &DecoderConfig::default()).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownType(_)));
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn size_mismatch_is_checked_for_every_kind() {
        let config = DecoderConfig::default();
        let resolver = CountingResolver::default();
        for raw in [
            &b"blob 4\0hello"[..],
            b"tree 1\0",
            b"commit 99\0tree x\n",
            b"tag 0\0object y\n",
        ] {
            let err = decode_object(raw, &resolver, &config).unwrap_err();
            assert!(matches!(err, DecodeError::SizeMismatch { .. }), "{raw:?}");
        }
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn size_mismatch_reports_both_sizes() {
        let err = decode_object(b"blob 4\0hello", &CountingResolver::default(), &DecoderConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SizeMismatch { kind: ObjectKind::Blob, declared: 4, actual: 5 }
        ));
    }

    #[test]
    fn lenient_policy_decodes_actual_body() {
        let decoded = decode_object(
            b"blob 4\0hello",
            &CountingResolver::default(),
            &DecoderConfig::lenient(),
        )
        .unwrap();
        assert_eq!(decoded.size(), 4);
        assert_eq!(decoded.object.as_blob().unwrap().data, b"hello");
    }

    #[test]
    fn decoding_is_repeatable() {
        let store = InMemoryObjectStore::new();
        let tree_id = oid(1);
        store
            .insert(tree_id, &tree_record(&[("100644", "a.txt", oid(2))]))
            .unwrap();
        let decoder = ObjectDecoder::new(&store);
        let raw = commit_record(&tree_id);

        let first = decoder.decode_raw(&raw).unwrap();
        let second = decoder.decode_raw(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn commit_tree_is_resolved_one_level() {
        let store = InMemoryObjectStore::new();
        let root = oid(1);
        let subtree = oid(3);
        store
            .insert(
                root,
                &tree_record(&[("40000", "src", subtree), ("100644", "README", oid(2))]),
            )
            .unwrap();
        // The subtree is absent: one-level resolution never asks for it.
        store.insert(oid(9), &commit_record(&root)).unwrap();

        let decoder = ObjectDecoder::new(&store);
        let decoded = decoder.decode(&oid(9)).unwrap();
        let commit = decoded.object.as_commit().unwrap();
        assert_eq!(commit.tree_id, root);
        assert_eq!(commit.tree.len(), 2);
        assert_eq!(commit.tree.get("src").unwrap().id, subtree);
    }

    #[test]
    fn tree_reference_to_a_blob_is_rejected() {
        let store = InMemoryObjectStore::new();
        store.insert(oid(1), b"blob 2\0hi").unwrap();
        store.insert(oid(9), &commit_record(&oid(1))).unwrap();

        let err = ObjectDecoder::new(&store).decode(&oid(9)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedKind { expected: ObjectKind::Tree, actual: ObjectKind::Blob, .. }
        ));
    }

    #[test]
    fn missing_tree_aborts_the_commit() {
        let store = InMemoryObjectStore::new();
        store.insert(oid(9), &commit_record(&oid(1))).unwrap();

        let err = ObjectDecoder::new(&store).decode(&oid(9)).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, DecodeError::Store(lodex_store::StoreError::NotFound(id)) if id == oid(1)));
    }

    #[test]
    fn missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let err = ObjectDecoder::new(&store).decode(&oid(5)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn read_raw_returns_inflated_bytes() {
        let store = InMemoryObjectStore::new();
        store.insert(oid(5), b"blob 1\0z").unwrap();
        assert_eq!(ObjectDecoder::new(&store).read_raw(&oid(5)).unwrap(), b"blob 1\0z");
    }
}
