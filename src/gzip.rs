//! The gzip (RFC 1952) container: header parsing, the DEFLATE payload, and
//! the CRC-32/ISIZE trailer.
use crate::crc32;
use crate::decoder;
use crate::errors::DecodeErrorStatus;

const MAGIC: [u8; 2] = [0x1F, 0x8B];
const METHOD_DEFLATE: u8 = 8;

const FLAG_FHCRC: u8 = 1 << 1;
const FLAG_FEXTRA: u8 = 1 << 2;
const FLAG_FNAME: u8 = 1 << 3;
const FLAG_FCOMMENT: u8 = 1 << 4;
const FLAG_RESERVED: u8 = 0b1110_0000;

/// Parse a gzip header at the start of `src`, returning the offset of the
/// first byte of the DEFLATE payload that follows it.
fn parse_header(src: &[u8]) -> Result<usize, DecodeErrorStatus>
{
    if src[0..2] != MAGIC
    {
        return Err(DecodeErrorStatus::Generic("not a gzip member: bad magic bytes"));
    }

    if src[2] != METHOD_DEFLATE
    {
        return Err(DecodeErrorStatus::Generic("unsupported gzip compression method"));
    }

    let flags = src[3];

    if flags & FLAG_RESERVED != 0
    {
        return Err(DecodeErrorStatus::Generic("reserved gzip header flag bits are set"));
    }

    // bytes 4..8 MTIME, byte 8 XFL, byte 9 OS: informational, not validated.
    let mut pos = 10usize;

    if flags & FLAG_FEXTRA != 0
    {
        if src.len() < pos + 2
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let xlen = usize::from(u16::from(src[pos]) | (u16::from(src[pos + 1]) << 8));
        pos += 2;
        if src.len() < pos + xlen
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        pos += xlen;
    }

    if flags & FLAG_FNAME != 0
    {
        pos += find_nul(src, pos)?;
    }

    if flags & FLAG_FCOMMENT != 0
    {
        pos += find_nul(src, pos)?;
    }

    if flags & FLAG_FHCRC != 0
    {
        if src.len() < pos + 2
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let stored = u16::from(src[pos]) | (u16::from(src[pos + 1]) << 8);
        let computed = (crc32::checksum(&src[..pos]) & 0xFFFF) as u16;
        if stored != computed
        {
            return Err(DecodeErrorStatus::MismatchedHeaderCRC(stored, computed));
        }
        pos += 2;
    }

    log::trace!("gzip header parsed, payload starts at byte {pos}");

    Ok(pos)
}

/// Advance past a NUL-terminated field starting at `src[from]`, returning how
/// many bytes (including the terminator) it occupies.
fn find_nul(src: &[u8], from: usize) -> Result<usize, DecodeErrorStatus>
{
    src.get(from..)
        .and_then(|rest| rest.iter().position(|&b| b == 0))
        .map(|i| i + 1)
        .ok_or(DecodeErrorStatus::InsufficientData)
}

/// Decode a gzip member from `src` into `dst`, optionally verifying the
/// trailer's CRC-32 and ISIZE against the decoded bytes.
pub(crate) fn gzip_inflate(
    src: &[u8], dst: &mut [u8], confirm_checksum: bool
) -> Result<usize, DecodeErrorStatus>
{
    // 10-byte minimal header + 8-byte trailer.
    if src.len() < 18
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    let payload_start = parse_header(src)?;
    let trailer_start = src.len() - 8;

    if trailer_start < payload_start
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    let n = decoder::inflate(&src[payload_start..trailer_start], dst)?;

    let trailer = &src[trailer_start..];
    let stored_crc = u32::from(trailer[0])
        | (u32::from(trailer[1]) << 8)
        | (u32::from(trailer[2]) << 16)
        | (u32::from(trailer[3]) << 24);
    let stored_size = u32::from(trailer[4])
        | (u32::from(trailer[5]) << 8)
        | (u32::from(trailer[6]) << 16)
        | (u32::from(trailer[7]) << 24);

    // ISIZE is the decompressed size modulo 2^32.
    let actual_size = n as u32;

    if stored_size != actual_size
    {
        return Err(DecodeErrorStatus::MismatchedSize(stored_size, actual_size));
    }

    if confirm_checksum
    {
        let computed_crc = crc32::checksum(&dst[..n]);

        if stored_crc != computed_crc
        {
            return Err(DecodeErrorStatus::MismatchedCRC(stored_crc, computed_crc));
        }
    }

    Ok(n)
}

/// Read a gzip member's ISIZE trailer field (the decompressed size modulo
/// 2^32) without decompressing anything.
pub(crate) fn isize_of(src: &[u8]) -> Result<u32, DecodeErrorStatus>
{
    if src.len() < 18
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    let tail = &src[src.len() - 4..];
    Ok(u32::from(tail[0])
        | (u32::from(tail[1]) << 8)
        | (u32::from(tail[2]) << 16)
        | (u32::from(tail[3]) << 24))
}
