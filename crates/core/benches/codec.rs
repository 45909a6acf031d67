use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffpack_core::code_table::CodeTable;
use huffpack_core::tree::HuffmanTree;
use huffpack_core::{compress_bytes, uncompress_bytes, FrequencyTable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn text_like(len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

fn tree_building(c: &mut Criterion) {
    let input: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let frequencies = FrequencyTable::from_bytes(&input).unwrap();

    c.bench_function("huffman tree + code table, full alphabet", |b| {
        b.iter(|| CodeTable::from_tree(&HuffmanTree::build(black_box(&frequencies))))
    });
}

fn compression(c: &mut Criterion) {
    let input = text_like(256 * 1024);

    c.bench_function("compress 256 KiB text", |b| {
        b.iter(|| compress_bytes(black_box(&input), true))
    });
}

fn decompression(c: &mut Criterion) {
    let input = text_like(256 * 1024);
    let compressed = compress_bytes(&input, true).unwrap();

    c.bench_function("uncompress 256 KiB text", |b| {
        b.iter(|| uncompress_bytes(black_box(&compressed)))
    });
}

criterion_group!(benches, tree_building, compression, decompression);
criterion_main!(benches);
