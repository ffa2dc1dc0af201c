//! Canonical-Huffman tree builder and bit-by-bit symbol decoder.
//!
//! A canonical Huffman code is fully determined by the length assigned to
//! each symbol: symbols are ordered first by increasing length, then by
//! increasing symbol value, and codewords are assigned in that order. That
//! means a tree can be represented without storing any codeword at all —
//! just how many symbols use each length (`counts`) and which symbols those
//! are, sorted (`symbols`). [`SymbolDecoder::decode_symbol`] walks the tree
//! by pulling one bit at a time and tracking its position within the current
//! length's run of leaves.
use crate::constants::{MAX_CODEWORD_LENGTH, MAX_NUM_SYMS};
use crate::errors::DecodeErrorStatus;
use crate::bitstream::BitReader;

/// A canonical Huffman code, ready to decode symbols from a [`BitReader`].
pub(crate) struct HuffmanTree
{
    /// `counts[len]` is the number of symbols whose codeword has length `len`.
    counts:  [u16; MAX_CODEWORD_LENGTH + 1],
    /// Symbols in canonical order: sorted by ascending codeword length, then
    /// by ascending symbol value.
    symbols: [u16; MAX_NUM_SYMS],
    /// Largest symbol index with a non-zero length, or `-1` if the tree has
    /// no codes at all.
    max_sym: i32
}

impl HuffmanTree
{
    /// A tree with no codes assigned. `build` must be called before this is
    /// used to decode anything.
    pub(crate) const fn empty() -> HuffmanTree
    {
        HuffmanTree { counts: [0; MAX_CODEWORD_LENGTH + 1], symbols: [0; MAX_NUM_SYMS], max_sym: -1 }
    }

    pub(crate) const fn max_sym(&self) -> i32
    {
        self.max_sym
    }

    /// Build a canonical Huffman tree from a vector of codeword lengths, one
    /// per symbol, indexed by symbol value. A `0` length means the symbol is
    /// unused.
    ///
    /// Rejects over-subscribed codes (more codewords of some length than the
    /// codespace allows) and incomplete codes other than the two cases
    /// DEFLATE explicitly permits: no codes at all, or exactly one code of
    /// length 1 (handled by the single-code patch below).
    pub(crate) fn build(&mut self, lengths: &[u8]) -> Result<(), DecodeErrorStatus>
    {
        debug_assert!(lengths.len() <= MAX_NUM_SYMS);

        self.counts = [0; MAX_CODEWORD_LENGTH + 1];
        self.max_sym = -1;

        for (i, &len) in lengths.iter().enumerate()
        {
            if len != 0
            {
                debug_assert!(usize::from(len) <= MAX_CODEWORD_LENGTH);
                self.max_sym = i as i32;
                self.counts[usize::from(len)] += 1;
            }
        }

        // Compute, for each length, the offset in `symbols` where that
        // length's codewords start, checking the Kraft inequality as we go:
        // at each length only `available` codewords' worth of codespace is
        // left to spend.
        let mut offs = [0u16; MAX_CODEWORD_LENGTH + 1];
        let mut available: u32 = 1;
        let mut num_codes: u32 = 0;

        for len in 0..=MAX_CODEWORD_LENGTH
        {
            let used = u32::from(self.counts[len]);

            if used > available
            {
                return Err(DecodeErrorStatus::Generic("over-subscribed Huffman code"));
            }

            available = 2 * (available - used);
            offs[len] = num_codes as u16;
            num_codes += used;
        }

        // Either the code is complete (no leftover codespace), or it's the
        // degenerate single-code case (exactly one codeword, of length 1),
        // or it's empty. Anything else is an incomplete code and invalid.
        if (num_codes > 1 && available > 0) || (num_codes == 1 && self.counts[1] != 1)
        {
            return Err(DecodeErrorStatus::Generic("incomplete Huffman code"));
        }

        for (i, &len) in lengths.iter().enumerate()
        {
            if len != 0
            {
                let slot = usize::from(len);
                self.symbols[usize::from(offs[slot])] = i as u16;
                offs[slot] += 1;
            }
        }

        // A single-code tree only has a codeword '0'. Synthesize a second
        // entry at codeword '1' mapping to a symbol one past max_sym, so
        // decode_symbol never needs to special-case a 1-bit tree: reading a
        // '1' naturally resolves to a symbol callers will reject as out of
        // range. DEFLATE requires this to be invalid for the literal/length
        // and distance alphabets, but valid for the code-length alphabet
        // (every call site range-checks the symbol it gets back either way).
        if num_codes == 1
        {
            self.counts[1] = 2;
            self.symbols[1] = (self.max_sym + 1) as u16;
        }

        Ok(())
    }

    /// Build the fixed literal/length tree (RFC 1951 §3.2.6): lengths
    /// 0..144 -> 8, 144..256 -> 9, 256..280 -> 7, 280..288 -> 8.
    ///
    /// Symbols 286 and 287 have assigned codewords (length 8, since the
    /// code must be complete) but are reserved and must never be produced by
    /// a conforming encoder, so `max_sym` is forced to 285 rather than the
    /// 287 a plain scan of `lengths` would report.
    pub(crate) fn build_fixed_litlen() -> HuffmanTree
    {
        let mut tree = HuffmanTree::empty();
        tree.build(&crate::constants::fixed_litlen_lengths())
            .expect("fixed literal/length lengths are always a valid canonical code");
        tree.max_sym = 285;
        tree
    }

    /// Build the fixed distance tree: all 32 codes have length 5.
    ///
    /// Distance codes 30 and 31 are likewise reserved, so `max_sym` is
    /// forced to 29.
    pub(crate) fn build_fixed_dist() -> HuffmanTree
    {
        let mut tree = HuffmanTree::empty();
        tree.build(&crate::constants::fixed_dist_lengths())
            .expect("fixed distance lengths are always a valid canonical code");
        tree.max_sym = 29;
        tree
    }

    /// Decode one symbol from `reader` using this tree.
    ///
    /// Walks the canonical code one bit at a time without ever building
    /// actual codeword values: at each length, `offs` is this code's
    /// position among that length's leaves and `base` is how many shorter
    /// codewords came before it, so `base + offs` indexes directly into
    /// `symbols`. A conforming stream never needs more than
    /// `MAX_CODEWORD_LENGTH` bits to resolve a symbol; going past that is
    /// treated as corrupt input rather than read forever.
    pub(crate) fn decode_symbol(&self, reader: &mut BitReader) -> Result<u16, DecodeErrorStatus>
    {
        let mut base: u32 = 0;
        let mut offs: u32 = 0;

        for len in 1..=MAX_CODEWORD_LENGTH
        {
            offs = 2 * offs + reader.get_bits(1);

            let count = u32::from(self.counts[len]);

            if offs < count
            {
                return Ok(self.symbols[(base + offs) as usize]);
            }

            base += count;
            offs -= count;
        }

        Err(DecodeErrorStatus::CorruptData)
    }
}
