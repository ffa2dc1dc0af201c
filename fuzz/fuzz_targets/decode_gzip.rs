#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes interpreted as a gzip member: header parsing, optional
    // field skipping, and the trailer check should all reject cleanly rather
    // than panic.
    let decoder = tiny_inflate::DeflateDecoder::new(data);
    let _ = decoder.decode_gzip();
});
