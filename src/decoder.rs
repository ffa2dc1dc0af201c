//! The DEFLATE (RFC 1951) block engine: the three block kinds, dynamic tree
//! transmission, and the ergonomic, allocating [`DeflateDecoder`] wrapped
//! around the allocation-free core in [`crate::raw`].
use alloc::vec;
use alloc::vec::Vec;

use crate::bitstream::BitReader;
use crate::constants::{
    BLOCKTYPE_DYNAMIC, BLOCKTYPE_FIXED, BLOCKTYPE_STORED, DIST_BASE, DIST_EXTRA_BITS, LENGTH_BASE,
    LENGTH_EXTRA_BITS, MAX_NUM_SYMS, NUM_PRECODE_SYMS, PRECODE_LENS_PERMUTATION
};
use crate::errors::{DecodeErrorStatus, InflateDecodeErrors};
use crate::huffman::HuffmanTree;

/// Largest possible count of combined literal/length + distance codeword
/// lengths (288 + 32), the alphabet a dynamic block's precode describes.
const MAX_LENS: usize = MAX_NUM_SYMS + 32;

/// Inflate one complete DEFLATE stream from `src` into `dst`, starting at
/// offset 0, returning the number of bytes written.
///
/// This is the allocation-free core: it never grows `dst`, and reports
/// [`DecodeErrorStatus::OutputBufferTooSmall`] rather than reallocating if it
/// runs out of room. [`DeflateDecoder`] below is the allocating convenience
/// wrapper most callers want.
pub(crate) fn inflate(src: &[u8], dst: &mut [u8]) -> Result<usize, DecodeErrorStatus>
{
    let mut reader = BitReader::new(src);
    inflate_core(&mut reader, dst)
}

/// Same as [`inflate`], but takes an already-positioned [`BitReader`] and
/// leaves it where the DEFLATE stream ended rather than discarding it.
///
/// Used by [`crate::gzip`], which needs to keep reading the reader's
/// underlying source past the compressed data to reach the trailer.
pub(crate) fn inflate_core(reader: &mut BitReader, dst: &mut [u8]) -> Result<usize, DecodeErrorStatus>
{
    let mut dst_pos = 0usize;

    loop
    {
        let is_final = reader.get_bits(1) == 1;
        let block_type = reader.get_bits(2);

        match block_type
        {
            BLOCKTYPE_STORED => decode_stored_block(reader, dst, &mut dst_pos)?,
            BLOCKTYPE_FIXED =>
            {
                let lt = HuffmanTree::build_fixed_litlen();
                let dt = HuffmanTree::build_fixed_dist();
                decode_compressed_block(reader, dst, &mut dst_pos, &lt, &dt)?;
            }
            BLOCKTYPE_DYNAMIC =>
            {
                let (lt, dt) = decode_dynamic_trees(reader)?;
                decode_compressed_block(reader, dst, &mut dst_pos, &lt, &dt)?;
            }
            _ => return Err(DecodeErrorStatus::CorruptData)
        }

        // A safe checkpoint: the block just decoded is fully formed, so it's
        // fine to notice here that the source ran out partway through it
        // rather than mid-symbol.
        if reader.overflowed()
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }

        if is_final
        {
            break;
        }
    }

    Ok(dst_pos)
}

/// Copy a stored (`BTYPE=0`) block's bytes straight from `reader`'s source
/// into `dst`.
fn decode_stored_block(
    reader: &mut BitReader, dst: &mut [u8], dst_pos: &mut usize
) -> Result<(), DecodeErrorStatus>
{
    reader.byte_align();

    let remaining = reader.remaining();

    if remaining.len() < 4
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    let len = u16::from(remaining[0]) | (u16::from(remaining[1]) << 8);
    let nlen = u16::from(remaining[2]) | (u16::from(remaining[3]) << 8);

    if len != !nlen
    {
        return Err(DecodeErrorStatus::CorruptData);
    }

    let len = usize::from(len);

    if remaining.len() < 4 + len
    {
        return Err(DecodeErrorStatus::InsufficientData);
    }

    let available = dst.len() - *dst_pos;

    if available < len
    {
        return Err(DecodeErrorStatus::OutputBufferTooSmall { needed: len - available, available });
    }

    dst[*dst_pos..*dst_pos + len].copy_from_slice(&remaining[4..4 + len]);
    *dst_pos += len;
    reader.advance(4 + len);

    Ok(())
}

/// Decode a fixed or dynamic Huffman-coded block's literals and matches until
/// its end-of-block symbol (256) is seen.
fn decode_compressed_block(
    reader: &mut BitReader, dst: &mut [u8], dst_pos: &mut usize, lt: &HuffmanTree, dt: &HuffmanTree
) -> Result<(), DecodeErrorStatus>
{
    loop
    {
        let sym = lt.decode_symbol(reader)?;

        // The reader feeds phantom zero-bits once its source runs out rather
        // than failing `decode_symbol` outright, so a stream truncated
        // mid-block can otherwise keep decoding zero-filled garbage symbols
        // all the way to a phantom EOB. Catching this right after each
        // literal/length symbol turns that into a data error instead of
        // either silently accepting garbage output or overrunning `dst`.
        if reader.overflowed()
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }

        // Guards against the single-code degenerate tree's synthetic
        // sentinel symbol (`max_sym + 1`, see huffman.rs's single-code
        // patch): a litlen tree with only EOB assigned is legal, but
        // reading its unused codeword must be a data error, not silently
        // fall through as a length symbol.
        if i32::from(sym) > lt.max_sym()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        if sym < 256
        {
            if *dst_pos >= dst.len()
            {
                return Err(DecodeErrorStatus::OutputBufferTooSmall { needed: 1, available: 0 });
            }
            dst[*dst_pos] = sym as u8;
            *dst_pos += 1;
            continue;
        }

        if sym == 256
        {
            return Ok(());
        }

        let len_idx = usize::from(sym) - 257;

        if len_idx >= LENGTH_EXTRA_BITS.len()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        let length =
            reader.get_bits_base(u32::from(LENGTH_EXTRA_BITS[len_idx]), u32::from(LENGTH_BASE[len_idx]))
                as usize;

        if dt.max_sym() < 0
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        let dist_sym = dt.decode_symbol(reader)?;

        if i32::from(dist_sym) > dt.max_sym() || usize::from(dist_sym) >= DIST_EXTRA_BITS.len()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        let distance = reader.get_bits_base(
            u32::from(DIST_EXTRA_BITS[usize::from(dist_sym)]),
            u32::from(DIST_BASE[usize::from(dist_sym)])
        ) as usize;

        if distance > *dst_pos
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        let available = dst.len() - *dst_pos;

        if available < length
        {
            return Err(DecodeErrorStatus::OutputBufferTooSmall { needed: length - available, available });
        }

        // Copied one byte at a time: distance can be smaller than length,
        // in which case the match deliberately reads bytes this same loop
        // already wrote (run-length expansion), so a bulk `copy_from_slice`
        // would be wrong.
        for _ in 0..length
        {
            dst[*dst_pos] = dst[*dst_pos - distance];
            *dst_pos += 1;
        }
    }
}

/// Read a dynamic block's header (RFC 1951 §3.2.7) and build its
/// literal/length and distance trees.
fn decode_dynamic_trees(reader: &mut BitReader) -> Result<(HuffmanTree, HuffmanTree), DecodeErrorStatus>
{
    let hlit = 257 + reader.get_bits(5) as usize;
    let hdist = 1 + reader.get_bits(5) as usize;
    let hclen = 4 + reader.get_bits(4) as usize;

    // The wire format allows HLIT up to 288 and HDIST up to 32, but symbols
    // 286/287 and distances 30/31 are reserved and never meaningfully used,
    // so a conforming encoder never needs values past 286/30.
    if hlit > 286 || hdist > 30
    {
        return Err(DecodeErrorStatus::CorruptData);
    }

    let mut precode_lens = [0u8; NUM_PRECODE_SYMS];

    for &i in PRECODE_LENS_PERMUTATION.iter().take(hclen)
    {
        precode_lens[usize::from(i)] = reader.get_bits(3) as u8;
    }

    let mut precode_tree = HuffmanTree::empty();
    precode_tree.build(&precode_lens)?;

    let total = hlit + hdist;
    let mut lens = [0u8; MAX_LENS];
    let mut i = 0usize;

    while i < total
    {
        let sym = precode_tree.decode_symbol(reader)?;

        if i32::from(sym) > precode_tree.max_sym()
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        let (value, repeat) = match sym
        {
            0..=15 =>
            {
                lens[i] = sym as u8;
                i += 1;
                continue;
            }
            16 =>
            {
                if i == 0
                {
                    return Err(DecodeErrorStatus::CorruptData);
                }
                (lens[i - 1], 3 + reader.get_bits(2) as usize)
            }
            17 => (0, 3 + reader.get_bits(3) as usize),
            18 => (0, 11 + reader.get_bits(7) as usize),
            _ => return Err(DecodeErrorStatus::CorruptData)
        };

        if i + repeat > total
        {
            return Err(DecodeErrorStatus::CorruptData);
        }

        lens[i..i + repeat].fill(value);
        i += repeat;
    }

    if lens[256] == 0
    {
        return Err(DecodeErrorStatus::CorruptData);
    }

    let mut litlen_tree = HuffmanTree::empty();
    litlen_tree.build(&lens[..hlit])?;

    let mut dist_tree = HuffmanTree::empty();
    dist_tree.build(&lens[hlit..hlit + hdist])?;

    Ok((litlen_tree, dist_tree))
}

/// Options controlling how [`DeflateDecoder`] sizes its output buffer and
/// whether it validates gzip checksums.
#[derive(Debug, Clone, Copy)]
pub struct DeflateOptions
{
    size_hint:        usize,
    limit:            usize,
    confirm_checksum: bool
}

impl Default for DeflateOptions
{
    fn default() -> DeflateOptions
    {
        DeflateOptions { size_hint: 1 << 15, limit: usize::MAX, confirm_checksum: true }
    }
}

impl DeflateOptions
{
    /// Initial guess for the decompressed size, used to size the first
    /// allocation. A good guess avoids the reallocate-and-retry path below.
    pub const fn set_size_hint(mut self, hint: usize) -> DeflateOptions
    {
        self.size_hint = hint;
        self
    }

    /// Largest output buffer this decoder will grow to before giving up with
    /// [`DecodeErrorStatus::OutputLimitExceeded`].
    pub const fn set_limit(mut self, limit: usize) -> DeflateOptions
    {
        self.limit = limit;
        self
    }

    /// Whether `decode_gzip` should verify the trailer's CRC-32 and ISIZE
    /// against the decoded bytes. Disabling this skips a full pass over the
    /// output but accepts truncated or corrupted gzip members silently.
    pub const fn set_confirm_checksum(mut self, yes: bool) -> DeflateOptions
    {
        self.confirm_checksum = yes;
        self
    }
}

/// An allocating decoder for raw DEFLATE streams and (with the `gzip`
/// feature) gzip members.
///
/// Wraps the allocation-free [`crate::raw`] functions, growing its output
/// buffer and retrying decompression from scratch whenever the buffer turns
/// out too small, up to `options.limit`.
pub struct DeflateDecoder<'a>
{
    data:    &'a [u8],
    options: DeflateOptions
}

impl<'a> DeflateDecoder<'a>
{
    /// Create a decoder over `data` with default options.
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a>
    {
        DeflateDecoder::new_with_options(data, DeflateOptions::default())
    }

    /// Create a decoder over `data` with explicit `options`.
    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a>
    {
        DeflateDecoder { data, options }
    }

    /// Decode `data` as a raw DEFLATE stream (no container).
    pub fn decode_deflate(&self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        self.decode_with(None, |dst| inflate(self.data, dst))
    }

    /// Decode `data` as a gzip member (RFC 1952): header, one or more
    /// DEFLATE blocks, then the CRC-32/ISIZE trailer.
    ///
    /// The initial buffer is sized from the trailer's ISIZE field when `data`
    /// is long enough to contain one, rather than from `options.size_hint`,
    /// since ISIZE is a far better guess for gzip input (it's usually exact,
    /// modulo the 2^32 wraparound) and reading it costs nothing extra.
    #[cfg(feature = "gzip")]
    pub fn decode_gzip(&self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let hint = crate::gzip::isize_of(self.data).ok().map(|n| n as usize);
        self.decode_with(hint, |dst| {
            crate::gzip::gzip_inflate(self.data, dst, self.options.confirm_checksum)
        })
    }

    fn decode_with(
        &self, size_hint: Option<usize>, decode: impl Fn(&mut [u8]) -> Result<usize, DecodeErrorStatus>
    ) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let mut capacity =
            size_hint.unwrap_or(self.options.size_hint).max(64).min(self.options.limit.max(64));

        loop
        {
            let mut dst = vec![0u8; capacity];

            match decode(&mut dst)
            {
                Ok(n) =>
                {
                    dst.truncate(n);
                    return Ok(dst);
                }
                Err(DecodeErrorStatus::OutputBufferTooSmall { .. }) =>
                {
                    if capacity >= self.options.limit
                    {
                        return Err(InflateDecodeErrors::new_with_error(
                            DecodeErrorStatus::OutputLimitExceeded(self.options.limit, capacity)
                        ));
                    }

                    log::trace!("output buffer of {capacity} bytes too small, growing and retrying");
                    capacity = capacity.saturating_mul(2).min(self.options.limit);
                }
                Err(e) => return Err(InflateDecodeErrors::new_with_error(e))
            }
        }
    }
}
