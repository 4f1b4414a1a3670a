use lodex_types::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::TreeResolver;
use crate::error::{DecodeError, DecodeResult};
use crate::fields::split_fields;
use crate::person::Person;
use crate::tree::Tree;

/// Commit object with its tree already resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Identifier from the `tree` line.
    pub tree_id: ObjectId,
    /// The tree named by `tree_id`, decoded one level deep.
    pub tree: Tree,
    /// `parent` lines in encounter order.
    pub parents: Vec<ObjectId>,
    pub author: Person,
    pub committer: Person,
    /// Labels not interpreted by the decoder (`gpgsig`, `encoding`, ...), in order.
    pub extra_headers: Vec<(String, String)>,
    /// Everything after the first blank line, untrimmed.
    pub message: String,
}

impl Commit {
    /// Returns `true` for a commit without parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` for a commit with more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Decode a commit body, resolving its tree through `resolver`.
///
/// All header lines are validated before the tree is resolved, so a malformed
/// commit never touches the store. A resolution failure is returned unchanged.
pub fn decode_commit(body: &[u8], resolver: &dyn TreeResolver) -> DecodeResult<Commit> {
    let parsed = split_fields(body).map_err(DecodeError::MalformedCommit)?;

    let mut tree_id = None;
    let mut parents = Vec::new();
    let mut author = None;
    let mut committer = None;
    let mut extra_headers = Vec::new();

    for field in parsed.fields {
        match field.label.as_str() {
            "tree" => {
                if tree_id.is_some() {
                    return Err(DecodeError::MalformedCommit("more than one tree line".into()));
                }
                tree_id = Some(parse_id("tree", &field.value)?);
            }
            "parent" => parents.push(parse_id("parent", &field.value)?),
            "author" => set_once(&mut author, "author", &field.value)?,
            "committer" => set_once(&mut committer, "committer", &field.value)?,
            _ => extra_headers.push((field.label, field.value)),
        }
    }

    let tree_id = tree_id.ok_or_else(|| DecodeError::MalformedCommit("missing tree line".into()))?;
    let author = author.ok_or_else(|| DecodeError::MalformedCommit("missing author line".into()))?;
    let committer =
        committer.ok_or_else(|| DecodeError::MalformedCommit("missing committer line".into()))?;

    debug!(tree = %tree_id, parents = parents.len(), "resolving commit tree");
    let tree = resolver.resolve_tree(&tree_id)?;

    Ok(Commit {
        tree_id,
        tree,
        parents,
        author,
        committer,
        extra_headers,
        message: String::from_utf8_lossy(parsed.message).into_owned(),
    })
}

fn parse_id(label: &str, value: &str) -> DecodeResult<ObjectId> {
    ObjectId::from_hex(value.trim())
        .map_err(|e| DecodeError::MalformedCommit(format!("{label} {value:?}: {e}")))
}

fn set_once(slot: &mut Option<Person>, label: &str, value: &str) -> DecodeResult<()> {
    if slot.is_some() {
        return Err(DecodeError::MalformedCommit(format!("more than one {label} line")));
    }
    let person = Person::parse(value)
        .map_err(|reason| DecodeError::MalformedCommit(format!("{label}: {reason}")))?;
    *slot = Some(person);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::tree::{EntryKind, TreeEntry};
    use lodex_store::StoreError;

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
    const P1: &str = "1111111111111111111111111111111111111111";
    const P2: &str = "2222222222222222222222222222222222222222";

    /// Resolver that returns a fixed tree and records every request.
    #[derive(Default)]
    struct FakeResolver {
        requests: RefCell<Vec<ObjectId>>,
        missing: bool,
    }

    impl TreeResolver for FakeResolver {
        fn resolve_tree(&self, id: &ObjectId) -> DecodeResult<Tree> {
            self.requests.borrow_mut().push(*id);
            if self.missing {
                return Err(StoreError::NotFound(*id).into());
            }
            Ok(Tree {
                entries: vec![TreeEntry {
                    mode: "100644".into(),
                    kind: EntryKind::File,
                    name: "README".into(),
                    id: ObjectId::from_raw([7; 20]),
                }],
            })
        }
    }

    fn sample() -> String {
        format!(
            "tree {TREE}\nparent {P1}\nparent {P2}\n\
             author A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\nmsg\n"
        )
    }

    #[test]
    fn decodes_sample_commit() {
        let resolver = FakeResolver::default();
        let commit = decode_commit(sample().as_bytes(), &resolver).unwrap();

        assert_eq!(commit.tree_id, ObjectId::from_hex(TREE).unwrap());
        assert_eq!(
            commit.parents,
            vec![ObjectId::from_hex(P1).unwrap(), ObjectId::from_hex(P2).unwrap()]
        );
        assert_eq!(commit.author.name, "A");
        assert_eq!(commit.author.email, "a@x");
        assert_eq!(commit.author.timestamp_raw, "1 +0000");
        assert_eq!(commit.committer.email, "c@x");
        assert_eq!(commit.message, "msg\n");
        assert_eq!(commit.tree.len(), 1);
        assert!(commit.is_merge());
    }

    #[test]
    fn resolves_exactly_the_referenced_tree() {
        let resolver = FakeResolver::default();
        decode_commit(sample().as_bytes(), &resolver).unwrap();
        assert_eq!(*resolver.requests.borrow(), vec![ObjectId::from_hex(TREE).unwrap()]);
    }

    #[test]
    fn multi_word_author_name() {
        let body = format!(
            "tree {TREE}\nauthor Grace Brewster Hopper <grace@navy.mil> 100 -0500\n\
             committer Grace Brewster Hopper <grace@navy.mil> 100 -0500\n\nFirst bug\n"
        );
        let commit = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap();
        assert_eq!(commit.author.name, "Grace Brewster Hopper");
        assert_eq!(commit.author.email, "grace@navy.mil");
        assert_eq!(commit.author.timestamp_raw, "100 -0500");
        assert!(commit.is_root());
    }

    #[test]
    fn unknown_labels_are_kept_aside() {
        let body = format!(
            "tree {TREE}\nauthor A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\
             encoding ISO-8859-1\ngpgsig -----BEGIN PGP SIGNATURE-----\n \n wsBc\n -----END PGP SIGNATURE-----\n\nsigned\n"
        );
        let commit = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap();
        assert_eq!(commit.extra_headers.len(), 2);
        assert_eq!(commit.extra_headers[0], ("encoding".into(), "ISO-8859-1".into()));
        assert_eq!(commit.extra_headers[1].0, "gpgsig");
        assert!(commit.extra_headers[1].1.ends_with("-----END PGP SIGNATURE-----"));
        assert_eq!(commit.message, "signed\n");
    }

    #[test]
    fn message_is_not_trimmed() {
        let body = format!(
            "tree {TREE}\nauthor A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\n\n  indented\n\n"
        );
        let commit = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap();
        assert_eq!(commit.message, "\n  indented\n\n");
    }

    #[test]
    fn missing_tree() {
        let body = "author A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\nmsg\n";
        let resolver = FakeResolver::default();
        let err = decode_commit(body.as_bytes(), &resolver).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedCommit(_)));
        assert!(resolver.requests.borrow().is_empty());
    }

    #[test]
    fn duplicate_tree() {
        let body = format!(
            "tree {TREE}\ntree {TREE}\nauthor A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\n"
        );
        let err = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedCommit(_)));
    }

    #[test]
    fn invalid_parent_id() {
        let body = format!(
            "tree {TREE}\nparent nope\nauthor A <a@x> 1 +0000\ncommitter C <c@x> 2 +0000\n\n"
        );
        let err = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedCommit(_)));
    }

    #[test]
    fn missing_committer() {
        let body = format!("tree {TREE}\nauthor A <a@x> 1 +0000\n\nmsg\n");
        let err = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedCommit(m) if m.contains("committer")));
    }

    #[test]
    fn author_without_email_brackets() {
        let body = format!(
            "tree {TREE}\nauthor A a@x 1 +0000\ncommitter C <c@x> 2 +0000\n\n"
        );
        let err = decode_commit(body.as_bytes(), &FakeResolver::default()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedCommit(m) if m.contains("author")));
    }

    #[test]
    fn committer_without_timestamp() {
        let resolver = FakeResolver::default();
        for committer in ["C <c@x>", "C <c@x> soon"] {
            let body = format!("tree {TREE}\nauthor A <a@x> 1 +0000\ncommitter {committer}\n\n");
            let err = decode_commit(body.as_bytes(), &resolver).unwrap_err();
            assert!(matches!(err, DecodeError::MalformedCommit(ref m) if m.contains("committer")), "{err:?}");
        }
        assert!(resolver.requests.borrow().is_empty());
    }

    #[test]
    fn unresolvable_tree_propagates() {
        let resolver = FakeResolver {
            missing: true,
            ..Default::default()
        };
        let err = decode_commit(sample().as_bytes(), &resolver).unwrap_err();
        assert!(err.is_not_found());
    }
}
