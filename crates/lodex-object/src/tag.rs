use lodex_types::{ObjectId, ObjectKind};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};
use crate::fields::{split_fields, Field};
use crate::person::Person;

/// Annotated tag object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The tagged object.
    pub object: ObjectId,
    /// Kind of the tagged object, as written on the `type` line.
    pub object_type: String,
    /// Tag name.
    pub name: String,
    /// Parsed the same way as commit authors.
    pub tagger: Person,
    /// Lines after `tagger` and before the blank line, if any.
    pub extra_headers: Vec<(String, String)>,
    /// Everything after the first blank line, untrimmed.
    pub message: String,
}

impl Tag {
    /// The `type` line as an [`ObjectKind`], when it names one of the four kinds.
    pub fn target_kind(&self) -> Option<ObjectKind> {
        ObjectKind::from_tag(self.object_type.as_bytes()).ok()
    }
}

const REQUIRED: [&str; 4] = ["object", "type", "tag", "tagger"];

/// Decode a tag body.
///
/// The four lines `object`, `type`, `tag` and `tagger` must come first and in
/// that order.
pub fn decode_tag(body: &[u8]) -> DecodeResult<Tag> {
    let parsed = split_fields(body).map_err(DecodeError::MalformedTag)?;
    let mut fields = parsed.fields.into_iter();

    let mut values: [String; 4] = Default::default();
    for (slot, label) in values.iter_mut().zip(REQUIRED) {
        match fields.next() {
            Some(Field { label: found, value }) if found == label => *slot = value,
            Some(Field { label: found, .. }) => {
                return Err(DecodeError::MalformedTag(format!(
                    "expected {label} line, found {found:?}"
                )))
            }
            None => return Err(DecodeError::MalformedTag(format!("missing {label} line"))),
        }
    }
    let [object, object_type, name, tagger] = values;

    let object = ObjectId::from_hex(object.trim())
        .map_err(|e| DecodeError::MalformedTag(format!("object {object:?}: {e}")))?;
    let tagger = Person::parse(&tagger)
        .map_err(|reason| DecodeError::MalformedTag(format!("tagger: {reason}")))?;

    Ok(Tag {
        object,
        object_type,
        name,
        tagger,
        extra_headers: fields.map(|f| (f.label, f.value)).collect(),
        message: String::from_utf8_lossy(parsed.message).into_owned(),
    })
}
