//! DEFLATE (RFC 1951 §3.2.5, §3.2.7) wire-format constants.

/// Number of symbols in the code-length ("precode") alphabet used to
/// transmit the literal/length and distance code lengths of a dynamic block.
pub(crate) const NUM_PRECODE_SYMS: usize = 19;

/// Maximum codeword length across all three DEFLATE alphabets.
pub(crate) const MAX_CODEWORD_LENGTH: usize = 15;

/// Largest symbol value across all three alphabets (the literal/length
/// alphabet has 288 entries, 0..=287).
pub(crate) const MAX_NUM_SYMS: usize = 288;

/// Order the precode's own code lengths are transmitted in; everything not
/// covered by `HCLEN` stays at length 0.
pub(crate) static PRECODE_LENS_PERMUTATION: [u8; NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15
];

/// Canonical codeword lengths of the fixed literal/length tree (RFC 1951
/// §3.2.6): 0..144 -> 8, 144..256 -> 9, 256..280 -> 7, 280..288 -> 8.
pub(crate) fn fixed_litlen_lengths() -> [u8; 288]
{
    let mut lens = [0u8; 288];
    lens[0..144].fill(8);
    lens[144..256].fill(9);
    lens[256..280].fill(7);
    lens[280..288].fill(8);
    lens
}

/// Canonical codeword lengths of the fixed distance tree: all 32 codes have
/// length 5.
pub(crate) fn fixed_dist_lengths() -> [u8; 32]
{
    [5u8; 32]
}

/// Extra bits to read for each length symbol (257..=285, indexed 0..=28),
/// and the base length each symbol's extra bits are added to. A match
/// length is always in `3..=258`.
pub(crate) const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0
];

pub(crate) const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258
];

/// Extra bits to read for each distance symbol (0..=29), and the base
/// distance each symbol's extra bits are added to. A back-reference
/// distance is always in `1..=32768`.
pub(crate) const DIST_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13
];

pub(crate) const DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577
];

/// DEFLATE block types (the 2-bit `BTYPE` field).
pub(crate) const BLOCKTYPE_STORED: u32 = 0;
pub(crate) const BLOCKTYPE_FIXED: u32 = 1;
pub(crate) const BLOCKTYPE_DYNAMIC: u32 = 2;
