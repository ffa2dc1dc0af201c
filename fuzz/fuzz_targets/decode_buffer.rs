#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes interpreted as a raw DEFLATE stream should never panic,
    // only ever return Ok or a decode error.
    let decoder = tiny_inflate::DeflateDecoder::new(data);
    let _ = decoder.decode_deflate();
});
