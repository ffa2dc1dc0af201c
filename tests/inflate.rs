//! Integration tests for the raw DEFLATE (RFC 1951) decode path, covering
//! the scenarios spec'd out against bit-exact hand-built streams plus a
//! cross-check against `flate2` for realistic payloads.
use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use tiny_inflate::errors::DecodeErrorStatus;
use tiny_inflate::raw::{self, Status};
use tiny_inflate::DeflateDecoder;

/// Packs bits into bytes the way `BitReader` expects to read them: bit index
/// `i` of the logical stream lands at bit `i % 8` of byte `i / 8`, so an
/// integer field's bits go in least-significant-bit first and a Huffman
/// codeword's bits go in most-significant-bit first (the codeword's own MSB
/// is pushed first).
#[derive(Default)]
struct BitWriter
{
    bits: Vec<u8>
}

impl BitWriter
{
    fn push_bit(&mut self, bit: u8)
    {
        self.bits.push(bit & 1);
    }

    /// Append an `n`-bit integer field, LSB first (matches `get_bits`).
    fn push_field(&mut self, value: u32, n: u32)
    {
        for i in 0..n
        {
            self.push_bit(((value >> i) & 1) as u8);
        }
    }

    /// Append an `n`-bit Huffman codeword, MSB first (matches how
    /// `decode_symbol` accumulates bits into `offs`).
    fn push_code(&mut self, code: u32, n: u32)
    {
        for i in (0..n).rev()
        {
            self.push_bit(((code >> i) & 1) as u8);
        }
    }

    fn finish(self) -> Vec<u8>
    {
        let mut bytes = vec![0u8; (self.bits.len() + 7) / 8];
        for (i, &bit) in self.bits.iter().enumerate()
        {
            if bit != 0
            {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        bytes
    }
}

/// Scenario 1: empty stored block.
#[test]
fn stored_block_empty()
{
    let data = [0x01, 0x00, 0x00, 0xFF, 0xFF];
    let mut dst = [0u8; 8];
    let mut len_out = 0;
    assert_eq!(raw::inflate(&data, &mut dst, &mut len_out), Status::Success);
    assert_eq!(len_out, 0);
}

/// Scenario 2: a single fixed-Huffman literal.
#[test]
fn fixed_huffman_single_literal()
{
    let mut w = BitWriter::default();
    w.push_field(1, 1); // BFINAL
    w.push_field(1, 2); // BTYPE = fixed
    w.push_code(0b10010001, 8); // literal 'a' (97)
    w.push_code(0b0000000, 7); // EOB (256)

    let decoder = DeflateDecoder::new(&w.finish());
    let out = decoder.decode_deflate().unwrap();
    assert_eq!(out, b"a");
}

/// Scenario 3 / max-length-match boundary: a literal 'a' followed by a
/// length-258 (the maximum), distance-1 (the minimum) back-reference,
/// hand-built under the fixed Huffman tree so every bit is accounted for.
#[test]
fn fixed_huffman_max_length_min_distance_match()
{
    let mut w = BitWriter::default();
    w.push_field(1, 1); // BFINAL
    w.push_field(1, 2); // BTYPE = fixed
    w.push_code(0b10010001, 8); // literal 'a' (97)
    w.push_code(0b11000101, 8); // length symbol 285 -> base 258, 0 extra bits
    w.push_code(0b00000, 5); // distance symbol 0 -> base 1, 0 extra bits
    w.push_code(0b0000000, 7); // EOB (256)

    let decoder = DeflateDecoder::new(&w.finish());
    let out = decoder.decode_deflate().unwrap();

    let expected = vec![b'a'; 259];
    assert_eq!(out, expected);
}

/// Scenario 5: a stored block whose LEN/NLEN complement check fails.
#[test]
fn rejects_corrupted_stored_block_complement()
{
    let data = [0x01, 0x03, 0x00, 0x00, 0x00];
    let mut dst = [0u8; 8];
    let mut len_out = 0;
    assert_eq!(raw::inflate(&data, &mut dst, &mut len_out), Status::DataError);
}

/// Destination exactly the decoded size succeeds; one byte smaller fails
/// with a buffer error.
#[test]
fn exact_size_buffer_succeeds_one_smaller_fails()
{
    let mut w = BitWriter::default();
    w.push_field(1, 1);
    w.push_field(1, 2);
    w.push_code(0b10010001, 8); // 'a'
    w.push_code(0b0000000, 7); // EOB
    let data = w.finish();

    let mut dst = [0u8; 1];
    let mut len_out = 0;
    assert_eq!(raw::inflate(&data, &mut dst, &mut len_out), Status::Success);
    assert_eq!(len_out, 1);

    let mut dst = [0u8; 0];
    let mut len_out = 0;
    assert_eq!(raw::inflate(&data, &mut dst, &mut len_out), Status::BufError);
}

/// A dynamic-Huffman block decoding "Hello, Hello!" with a back-reference to
/// the first "Hello", cross-checked against `flate2`'s own encoder so the
/// exact block type it picks doesn't need to be pinned down by hand.
#[test]
fn dynamic_block_hello_hello()
{
    let payload = b"Hello, Hello!";
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    let compressed = encoder.finish().unwrap();

    let decoder = DeflateDecoder::new(&compressed);
    let out = decoder.decode_deflate().unwrap();
    assert_eq!(out, payload);
}

/// Round-trips a handful of payloads (empty, short, highly repetitive,
/// binary) through `flate2`'s encoder and this crate's decoder.
#[test]
fn round_trips_against_flate2()
{
    let payloads: &[&[u8]] = &[
        b"",
        b"A",
        b"The quick brown fox jumps over the lazy dog",
        &[0u8; 5000],
        &{
            let mut v = Vec::new();
            for i in 0..10000u32
            {
                v.push((i % 251) as u8);
            }
            v
        }
    ];

    for payload in payloads
    {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(payload).unwrap();
        let compressed = encoder.finish().unwrap();

        let decoder = DeflateDecoder::new(&compressed);
        let out = decoder.decode_deflate().unwrap();
        assert_eq!(&out, payload);
    }
}

/// A back-reference whose distance exceeds how much output has been
/// produced so far is a data error, not an out-of-bounds read.
#[test]
fn rejects_back_reference_before_output_start()
{
    let mut w = BitWriter::default();
    w.push_field(1, 1); // BFINAL
    w.push_field(1, 2); // BTYPE = fixed
    // length symbol 257 (base 3, 0 extra bits) with no literal emitted yet.
    w.push_code(0b0000001, 7); // fixed code for symbol 257
    w.push_code(0b00000, 5); // distance symbol 0 -> distance 1, but dst_pos is 0
    w.push_code(0b0000000, 7); // EOB

    let mut dst = [0u8; 16];
    let mut len_out = 0;
    assert_eq!(raw::inflate(&w.finish(), &mut dst, &mut len_out), Status::DataError);
}

/// `DecodeErrorStatus::status()` collapses down to the flat taxonomy the way
/// the raw boundary promises.
#[test]
fn error_status_collapses_to_flat_taxonomy()
{
    assert_eq!(DecodeErrorStatus::CorruptData.status(), Status::DataError);
    assert_eq!(
        DecodeErrorStatus::OutputBufferTooSmall { needed: 1, available: 0 }.status(),
        Status::BufError
    );
}
