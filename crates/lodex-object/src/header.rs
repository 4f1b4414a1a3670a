//! The `<type> <size>\0` prefix of every inflated record.
//!
//! Parsing works on bytes only. The body that follows may contain NUL and
//! arbitrary binary data, so nothing past the first NUL is ever scanned here.

use lodex_types::ObjectKind;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

/// Longest type tag ("commit").
const MAX_TAG_LEN: usize = 6;

/// Parsed object header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The record kind named by the type tag.
    pub kind: ObjectKind,
    /// Body length in bytes, as declared by the header.
    pub declared_size: u64,
}

impl Header {
    pub fn new(kind: ObjectKind, declared_size: u64) -> Self {
        Self {
            kind,
            declared_size,
        }
    }
}

/// Split an inflated record into its header and body.
///
/// The returned slice starts exactly at the first body byte.
pub fn parse_header(raw: &[u8]) -> DecodeResult<(Header, &[u8])> {
    let space = raw
        .iter()
        .position(|&b| b == b' ' || b == 0)
        .filter(|&at| raw[at] == b' ')
        .ok_or_else(|| DecodeError::MalformedHeader("missing space after type tag".into()))?;
    let tag = &raw[..space];
    let kind = ObjectKind::from_tag(tag).map_err(|_| {
        let lossy = String::from_utf8_lossy(tag);
        let mut shown: String = lossy.chars().take(MAX_TAG_LEN * 4).collect();
        if shown.len() < lossy.len() {
            shown.push('…');
        }
        DecodeError::UnknownType(shown)
    })?;

    let rest = &raw[space + 1..];
    let nul = rest.iter().position(|&b| b == 0).ok_or_else(|| {
        DecodeError::MalformedHeader("missing NUL after declared size".into())
    })?;
    let declared_size = parse_size(&rest[..nul])?;

    Ok((Header::new(kind, declared_size), &rest[nul + 1..]))
}

fn parse_size(digits: &[u8]) -> DecodeResult<u64> {
    if digits.is_empty() {
        return Err(DecodeError::MalformedHeader("empty size".into()));
    }
    digits.iter().try_fold(0u64, |acc, &b| {
        if !b.is_ascii_digit() {
            return Err(DecodeError::MalformedHeader(format!(
                "size is not a decimal number: {:?}",
                String::from_utf8_lossy(digits)
            )));
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .ok_or_else(|| DecodeError::MalformedHeader("size overflows u64".into()))
    })
}
