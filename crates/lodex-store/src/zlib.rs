//! zlib helpers shared by every backend.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use lodex_types::ObjectId;

use crate::error::{StoreError, StoreResult};

const CHUNK: usize = 8 * 1024;

/// Inflate a complete zlib stream.
///
/// The stream must reach its end marker: a truncated stream or invalid data
/// yields [`StoreError::Decompression`], labelled with `id`. Bytes after the
/// end marker are ignored.
pub fn inflate(id: &ObjectId, compressed: &[u8]) -> StoreResult<Vec<u8>> {
    let fail = |reason: String| StoreError::Decompression { id: *id, reason };

    let mut stream = Decompress::new(true);
    let mut out = Vec::with_capacity(CHUNK.max(compressed.len() * 2));
    loop {
        if out.len() == out.capacity() {
            out.reserve(CHUNK.max(out.len()));
        }
        let (before_in, before_out) = (stream.total_in(), stream.total_out());
        // `None` keeps the inflater's window across calls while `out` grows.
        let status = stream
            .decompress_vec(&compressed[before_in as usize..], &mut out, FlushDecompress::None)
            .map_err(|e| fail(e.to_string()))?;
        if status == Status::StreamEnd {
            return Ok(out);
        }
        let stalled = stream.total_in() == before_in && stream.total_out() == before_out;
        if stalled && out.len() < out.capacity() {
            return Err(fail(format!(
                "stream ended early after {} compressed bytes",
                stream.total_in()
            )));
        }
    }
}

/// Deflate bytes into a zlib stream at the default level.
pub fn deflate(plain: &[u8]) -> StoreResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(plain)?;
    Ok(encoder.finish()?)
}
