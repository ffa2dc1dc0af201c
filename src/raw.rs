//! Allocation-free decompression entry points, for callers that own their
//! output buffer and want a flat, C-ABI-shaped status back rather than a
//! Rust error type.
//!
//! [`crate::DeflateDecoder`] is built on top of this module and is the
//! better fit for most callers; use this one directly only when an
//! allocation per call is unacceptable.
use crate::errors::DecodeErrorStatus;

/// The outcome of a raw decompression call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status
{
    /// Decompression completed and `dst` holds the full output.
    Success,
    /// The compressed stream is malformed.
    DataError,
    /// `dst` was too small to hold the decompressed output, or `src` ended
    /// before a complete stream was read.
    BufError,
    /// A gzip trailer's CRC-32 or ISIZE field did not match the decoded
    /// bytes.
    CrcError
}

impl From<DecodeErrorStatus> for Status
{
    fn from(err: DecodeErrorStatus) -> Status
    {
        err.status()
    }
}

/// Inflate a raw DEFLATE stream (RFC 1951, no container) from `src` into
/// `dst`. On success, `*len_out` is set to the number of bytes written.
pub fn inflate(src: &[u8], dst: &mut [u8], len_out: &mut usize) -> Status
{
    match crate::decoder::inflate(src, dst)
    {
        Ok(n) =>
        {
            *len_out = n;
            Status::Success
        }
        Err(e) => e.into()
    }
}

/// Inflate a gzip member (RFC 1952) from `src` into `dst`. On success,
/// `*len_out` is set to the number of bytes written.
///
/// `confirm_checksum` controls whether the trailer's CRC-32 and ISIZE are
/// verified against the decoded bytes; skipping this accepts truncated or
/// corrupted members silently.
#[cfg(feature = "gzip")]
pub fn gzip_inflate(src: &[u8], dst: &mut [u8], len_out: &mut usize, confirm_checksum: bool) -> Status
{
    match crate::gzip::gzip_inflate(src, dst, confirm_checksum)
    {
        Ok(n) =>
        {
            *len_out = n;
            Status::Success
        }
        Err(e) => e.into()
    }
}

/// Read a gzip member's ISIZE trailer field (the decompressed size modulo
/// 2^32) directly, without decompressing anything. Callers can use this to
/// size a destination buffer before calling `gzip_inflate`.
///
/// Returns 0 if `src` is too short to contain a trailer; a real gzip member
/// of nothing (an empty payload) also has ISIZE 0, so this is not
/// distinguishable from a genuinely empty member without also checking
/// `src`'s length.
#[cfg(feature = "gzip")]
pub fn gzip_isize(src: &[u8]) -> u32
{
    crate::gzip::isize_of(src).unwrap_or(0)
}
