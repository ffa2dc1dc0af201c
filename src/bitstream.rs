//! `BitReader` API
//!
//! Reads bits LSB-first out of a byte slice, the order DEFLATE packs both
//! its multi-bit integer fields and (via [`crate::huffman`]'s bit-by-bit
//! walk) its Huffman codes in.

/// Reads bits out of a borrowed byte slice.
///
/// `tag` accumulates bytes pulled from `source`, LSB-first: byte `B` read
/// while `bitcount` bits are already buffered is OR'd into `tag` at bit
/// position `bitcount`, and `bitcount` always advances by a full 8 regardless
/// of how many bits the caller actually asked for. Reading past the end of
/// `source` does not fail outright: it feeds zero-filled phantom bits and
/// sets the sticky `overflow` flag instead, so a decode loop can finish the
/// symbol it's in the middle of before a caller checks `overflowed()` at a
/// safe checkpoint (see `decoder.rs`). This keeps the hot bit-decode loop
/// free of a branch per bit.
pub(crate) struct BitReader<'src>
{
    source:   &'src [u8],
    position: usize,
    tag:      u32,
    bitcount: u32,
    overflow: bool
}

impl<'src> BitReader<'src>
{
    /// Create a new `BitReader` over `source`, starting at its first byte.
    pub(crate) fn new(source: &'src [u8]) -> BitReader<'src>
    {
        BitReader { source, position: 0, tag: 0, bitcount: 0, overflow: false }
    }

    /// Ensure at least `num` bits are buffered in `tag`, refilling a byte at
    /// a time from `source`. `num` must be at most 32.
    ///
    /// If `source` runs out before `num` bits are available, phantom zero
    /// bits are supplied and `overflow` is set; this call never fails.
    fn refill(&mut self, num: u32)
    {
        debug_assert!(num <= 32);

        while self.bitcount < num
        {
            match self.source.get(self.position)
            {
                Some(&byte) =>
                {
                    self.tag |= u32::from(byte) << self.bitcount;
                    self.position += 1;
                }
                None => self.overflow = true
            }
            self.bitcount += 8;
        }
    }

    /// Read `num` bits (`num` in `0..=32`) and remove them from the stream.
    pub(crate) fn get_bits(&mut self, num: u32) -> u32
    {
        debug_assert!(num <= 32);

        self.refill(num);

        let value = if num == 32 { self.tag } else { self.tag & ((1_u32 << num) - 1) };

        self.tag = if num == 32 { 0 } else { self.tag >> num };
        self.bitcount -= num;

        value
    }

    /// Read a `num`-bit value and add `base` to it. `num == 0` short-circuits
    /// to `base` without touching the bit buffer, since 0-bit extra-bits
    /// fields are common in the length/distance tables.
    pub(crate) fn get_bits_base(&mut self, num: u32, base: u32) -> u32
    {
        base + if num == 0 { 0 } else { self.get_bits(num) }
    }

    /// Discard any buffered bits so the next read starts on a fresh byte
    /// boundary. Used only before a stored block's LEN/NLEN header.
    pub(crate) fn byte_align(&mut self)
    {
        self.tag = 0;
        self.bitcount = 0;
    }

    /// `true` once a refill has had to invent phantom bits because `source`
    /// ran out. Sticky: never clears itself.
    pub(crate) const fn overflowed(&self) -> bool
    {
        self.overflow
    }

    /// Bytes of `source` not yet consumed into `tag`.
    ///
    /// Valid to call only right after [`Self::byte_align`], since that's the
    /// only time `position` is guaranteed to not be "ahead" of bits the
    /// caller still has buffered.
    pub(crate) fn remaining(&self) -> &'src [u8]
    {
        &self.source[self.position..]
    }

    /// Advance the raw byte cursor by `n` bytes, bypassing the bit buffer.
    /// Used after consuming a stored block's raw payload directly from
    /// `remaining()`.
    pub(crate) fn advance(&mut self, n: usize)
    {
        self.position += n;
    }
}

#[cfg(test)]
mod tests
{
    use super::BitReader;

    #[test]
    fn reads_lsb_first()
    {
        // 0b0000_0001 -> bit0 = 1, bit1 = 0, bit2 = 0
        let data = [0b0000_0001];
        let mut r = BitReader::new(&data);

        assert_eq!(r.get_bits(1), 1);
        assert_eq!(r.get_bits(2), 0);
    }

    #[test]
    fn get_bits_base_skips_read_when_zero_bits()
    {
        let data = [0xFF, 0xFF];
        let mut r = BitReader::new(&data);

        assert_eq!(r.get_bits_base(0, 42), 42);
        // nothing was consumed from the stream
        assert_eq!(r.get_bits(8), 0xFF);
    }

    #[test]
    fn overflow_is_sticky_and_feeds_zero_bits()
    {
        let data = [0xFFu8];
        let mut r = BitReader::new(&data);

        // consume the only byte, then ask for more than is left
        assert_eq!(r.get_bits(8), 0xFF);
        assert!(!r.overflowed());

        assert_eq!(r.get_bits(8), 0);
        assert!(r.overflowed());
    }

    #[test]
    fn byte_align_then_remaining_points_at_next_byte()
    {
        let data = [0x01, 0xAA, 0xBB];
        let mut r = BitReader::new(&data);

        let _ = r.get_bits(3); // pulls one byte into tag, consumes 3 bits of it
        r.byte_align();

        assert_eq!(r.remaining(), &[0xAA, 0xBB]);
    }
}
