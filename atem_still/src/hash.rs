//! Frame digests, used to detect whether a still has changed.
//!
//! The switcher uses MD5 to check file transfers, so the same digest is used
//! here.

/// Computes the MD5 of a frame.
pub fn frame_md5(b: &[u8]) -> [u8; 16] {
    let mut md5 = md5::Context::new();
    md5.consume(b);
    md5.finalize().into()
}

/// Computes a hex-encoded MD5 of a frame, for change detection.
///
/// Returns `None` for an empty buffer.
///
/// The digest is lowercase hex, not base64. Hashes stored by tools which
/// base64 encode the same MD5 will not compare equal to these; use
/// [frame_md5] to get the raw digest and encode it another way.
pub fn generate_hash_for_buffer(b: &[u8]) -> Option<String> {
    if b.is_empty() {
        return None;
    }
    Some(hex::encode(frame_md5(b)))
}
