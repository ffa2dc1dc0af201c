use std::io::Write;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flate2::write::DeflateEncoder;
use flate2::Compression;

/// A synthetic but realistically compressible corpus: English-ish text
/// repeated with enough variation that the Huffman tables aren't trivial and
/// LZ77 back-references span a useful range of distances.
fn corpus() -> Vec<u8>
{
    let paragraph = b"The quick brown fox jumps over the lazy dog. \
Pack my box with five dozen liquor jugs. How vexingly quick daft zebras jump! \
";
    let mut data = Vec::with_capacity(paragraph.len() * 4000);

    for i in 0..4000
    {
        data.extend_from_slice(paragraph);
        if i % 97 == 0
        {
            data.extend_from_slice(format!("-- marker {i} --\n").as_bytes());
        }
    }

    data
}

fn deflate_compress(data: &[u8]) -> Vec<u8>
{
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn decode_flate2(compressed: &[u8], original_len: usize) -> Vec<u8>
{
    use std::io::Read;

    let mut writer = Vec::with_capacity(original_len);
    let mut deflater = flate2::read::DeflateDecoder::new(compressed);
    deflater.read_to_end(&mut writer).unwrap();
    writer
}

fn decode_tiny_inflate(compressed: &[u8]) -> Vec<u8>
{
    let decoder = tiny_inflate::DeflateDecoder::new(compressed);
    decoder.decode_deflate().unwrap()
}

fn decode_libdeflater(compressed: &[u8], original_len: usize) -> Vec<u8>
{
    let mut decompressor = libdeflater::Decompressor::new();
    let mut out = vec![0u8; original_len];
    let n = decompressor.deflate_decompress(compressed, &mut out).unwrap();
    out.truncate(n);
    out
}

fn decode_test(c: &mut Criterion)
{
    let data = corpus();
    let compressed = deflate_compress(&data);

    let mut group = c.benchmark_group("DEFLATE decoding");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("flate2-[zlib-ng]", |b| {
        b.iter(|| black_box(decode_flate2(compressed.as_slice(), data.len())))
    });

    group.bench_function("tiny-inflate", |b| {
        b.iter(|| black_box(decode_tiny_inflate(compressed.as_slice())))
    });

    group.bench_function("libdeflater", |b| {
        b.iter(|| black_box(decode_libdeflater(compressed.as_slice(), data.len())))
    });
}

criterion_group!(name=benches;
      config={
      let c = Criterion::default();
        c.measurement_time(Duration::from_secs(10))
      };
    targets=decode_test);

criterion_main!(benches);
