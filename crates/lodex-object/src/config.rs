use serde::{Deserialize, Serialize};

/// What to do when a body's length disagrees with its declared size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePolicy {
    /// Fail with [`DecodeError::SizeMismatch`](crate::DecodeError::SizeMismatch).
    #[default]
    Strict,
    /// Log a warning and decode the body that is actually present.
    Warn,
}

/// Decoder settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Applied uniformly to blob, tree, commit and tag bodies.
    pub size_policy: SizePolicy,
}

impl DecoderConfig {
    /// A configuration that tolerates size mismatches.
    pub fn lenient() -> Self {
        Self {
            size_policy: SizePolicy::Warn,
        }
    }
}
