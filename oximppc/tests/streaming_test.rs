//! Chunking independence across the streaming entry points.

mod common;

use common::{StreamBuilder, encode_greedy, random_bytes, sample_text, split_chunks};
use oximppc::{
    DecompressStatus, Decompressor, MppcDecoder, MppcReader, decompress, decompress_chunked,
};
use std::io::Read;

fn mixed_stream() -> (Vec<u8>, Vec<u8>) {
    let mut original = sample_text(20_000);
    original.extend(random_bytes(3000, 11));
    original.extend(sample_text(5000));
    let stream = encode_greedy(&original);
    (original, stream)
}

fn decode_chunks(chunks: &[&[u8]]) -> Vec<u8> {
    let mut decoder = MppcDecoder::new();
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.update(chunk).unwrap());
    }
    out
}

#[test]
fn test_random_partitions() {
    let (original, stream) = mixed_stream();
    assert_eq!(decompress(&stream).unwrap(), original);

    for (seed, max_chunk) in [(1u64, 2usize), (2, 7), (3, 64), (4, 1000), (5, 5000)] {
        let chunks = split_chunks(&stream, max_chunk, seed);
        assert_eq!(decode_chunks(&chunks), original, "max chunk {}", max_chunk);
    }
}

#[test]
fn test_byte_at_a_time() {
    let (original, stream) = mixed_stream();
    let chunks: Vec<&[u8]> = stream.chunks(1).collect();
    assert_eq!(decode_chunks(&chunks), original);
}

#[test]
fn test_every_split_point() {
    let mut builder = StreamBuilder::new();
    builder
        .literals(b"abc\xF0\x81def")
        .copy(3, 3)
        .copy(70, 4)
        .copy(8, 20)
        .literal(b'Z')
        .copy(1, 300)
        .literals(b"tail");
    let stream = builder.finish();
    let expected = decompress(&stream).unwrap();
    assert!(expected.len() > 300);

    for split in 0..=stream.len() {
        let (head, tail) = stream.split_at(split);
        assert_eq!(decode_chunks(&[head, tail]), expected, "split at {}", split);
    }
}

#[test]
fn test_empty_chunks_are_harmless() {
    let (original, stream) = mixed_stream();
    let mut chunks: Vec<&[u8]> = Vec::new();
    for chunk in split_chunks(&stream, 100, 9) {
        chunks.push(&[]);
        chunks.push(chunk);
    }
    chunks.push(&[]);
    assert_eq!(decode_chunks(&chunks), original);
}

#[test]
fn test_decompress_chunked_matches_whole() {
    let (original, stream) = mixed_stream();
    let chunks = split_chunks(&stream, 333, 21);
    assert_eq!(decompress_chunked(chunks).unwrap(), original);
}

#[test]
fn test_stats_independent_of_chunking() {
    let (_, stream) = mixed_stream();

    let mut whole = MppcDecoder::new();
    whole.update(&stream).unwrap();

    let mut split = MppcDecoder::new();
    for chunk in split_chunks(&stream, 17, 5) {
        split.update(chunk).unwrap();
    }

    assert_eq!(whole.stats(), split.stats());
    assert_eq!(whole.history_len(), split.history_len());
    assert_eq!(whole.phase(), split.phase());
}

#[test]
fn test_decompressor_various_buffers() {
    let (original, stream) = mixed_stream();

    for (in_size, out_size) in [(1usize, 1usize), (3, 5), (64, 16), (4096, 3), (100_000, 100_000)] {
        let mut decoder = MppcDecoder::new();
        let mut out = Vec::new();
        let mut buf = vec![0u8; out_size];
        let mut input = &stream[..];

        loop {
            let take = in_size.min(input.len());
            let (consumed, produced, status) =
                decoder.decompress(&input[..take], &mut buf).unwrap();
            input = &input[consumed..];
            out.extend_from_slice(&buf[..produced]);
            if status == DecompressStatus::NeedsInput && input.is_empty() {
                break;
            }
        }

        assert_eq!(out, original, "in {} out {}", in_size, out_size);
    }
}

#[test]
fn test_decompress_all() {
    let (original, stream) = mixed_stream();
    let mut decoder = MppcDecoder::new();
    assert_eq!(decoder.decompress_all(&stream).unwrap(), original);
}

#[test]
fn test_reader_chunk_sizes() {
    let (original, stream) = mixed_stream();

    for chunk_size in [1usize, 2, 13, 512, 4096, 1 << 20] {
        let mut reader = MppcReader::new(&stream[..]).with_chunk_size(chunk_size);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, original, "chunk size {}", chunk_size);
        assert_eq!(reader.decoder().stats().input_bytes, stream.len() as u64);
        assert!(reader.decoder().is_at_codeword_boundary());

        // The inner slice reader has been drained.
        let rest = reader.into_inner();
        assert!(rest.is_empty());
    }
}

#[test]
fn test_reader_with_small_reads() {
    let (original, stream) = mixed_stream();
    let mut reader = MppcReader::new(&stream[..]).with_chunk_size(7);
    let mut out = Vec::new();
    let mut buf = [0u8; 3];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, original);
}
