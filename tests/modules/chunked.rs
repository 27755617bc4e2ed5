use bson::{doc, oid::ObjectId, Bson};
use bson2json::{to_json, Error, Transcoder};
use pretty_assertions::assert_eq;

use super::{raw_doc, to_bytes};

fn sample_doc() -> bson::Document {
    let strings: Vec<String> = (0..20)
        .map(|i| format!("value {i} with a \"quote\", a \\ and a\ttab"))
        .collect();
    doc! {
        "strings": strings,
        "ints": (0..64).collect::<Vec<i32>>(),
        "nested": { "a": [1.5, 2.5, 1e21], "b": Bson::Null, "c": false },
        "id": ObjectId::from_bytes([7; 12]),
        "when": bson::DateTime::from_millis(1_575_271_655_028),
    }
}

#[test]
fn chunk_concatenation_equals_one_shot() {
    let bytes = to_bytes(&sample_doc());
    let expected = to_json(&bytes, false).unwrap();
    assert!(expected.len() > 128, "sample too small to need chunks");

    for chunk_size in [1, 3, 7, 16, 64, 1024, 1 << 20] {
        let mut chunks = Transcoder::new()
            .chunk_size(chunk_size)
            .transcode_chunked(bytes.clone());
        let mut collected = Vec::new();
        let mut pulls = 0usize;
        while let Some(chunk) = chunks.next_chunk().unwrap() {
            assert!(!chunk.is_empty(), "empty chunk at size {chunk_size}");
            assert!(chunk.len() <= chunk_size, "oversized chunk at {chunk_size}");
            collected.extend_from_slice(chunk);
            pulls += 1;
        }
        assert_eq!(collected, expected, "chunk size {chunk_size}");
        if chunk_size < expected.len() {
            assert!(pulls >= 2, "expected multiple chunks at size {chunk_size}");
        }
    }
}

#[test]
fn iterator_interface_copies_chunks() {
    let bytes = to_bytes(&sample_doc());
    let expected = to_json(&bytes, false).unwrap();

    let chunks: Result<Vec<Vec<u8>>, Error> = Transcoder::new()
        .chunk_size(32)
        .transcode_chunked(bytes)
        .collect();
    let collected: Vec<u8> = chunks.unwrap().concat();
    assert_eq!(collected, expected);
}

#[test]
fn fixed_buffer_bounds_the_chunks() {
    let bytes = to_bytes(&sample_doc());
    let expected = to_json(&bytes, false).unwrap();

    let mut chunks = Transcoder::new()
        .fixed_buffer(Vec::with_capacity(48))
        .transcode_chunked(bytes);
    let mut collected = Vec::new();
    while let Some(chunk) = chunks.next_chunk().unwrap() {
        assert!(chunk.len() <= 48);
        collected.extend_from_slice(chunk);
    }
    assert_eq!(collected, expected);
}

#[test]
fn array_framing_streams_too() {
    let doc = doc! { "0": "alpha", "1": "beta", "2": 3 };
    let bytes = to_bytes(&doc);
    let expected = to_json(&bytes, true).unwrap();
    assert_eq!(expected, br#"["alpha","beta",3]"#);

    let mut chunks = Transcoder::new()
        .as_array(true)
        .chunk_size(5)
        .transcode_chunked(bytes);
    let mut collected = Vec::new();
    while let Some(chunk) = chunks.next_chunk().unwrap() {
        collected.extend_from_slice(chunk);
    }
    assert_eq!(collected, expected);
}

#[test]
fn error_mid_stream_ends_with_the_error() {
    // A long valid string (several chunks of output) followed by an element
    // whose string length is zero.
    let mut elements = vec![0x02];
    elements.extend_from_slice(b"s\0");
    elements.extend_from_slice(&101i32.to_le_bytes());
    elements.extend_from_slice(&[b'a'; 100]);
    elements.push(0);
    elements.push(0x02);
    elements.extend_from_slice(b"x\0");
    elements.extend_from_slice(&0i32.to_le_bytes());
    let bytes = raw_doc(&elements);

    let mut chunks = Transcoder::new().chunk_size(16).transcode_chunked(bytes);
    let mut collected = Vec::new();
    let err = loop {
        match chunks.next_chunk() {
            Ok(Some(chunk)) => collected.extend_from_slice(chunk),
            Ok(None) => panic!("stream ended without reporting the error"),
            Err(err) => break err,
        }
    };
    assert_eq!(err, Error::BadStringLength);
    // Chunks delivered before the failure are a prefix of the valid output.
    assert!(!collected.is_empty());
    assert!(collected.starts_with(b"{\"s\":\"aaaa"));
    // After the error the stream stays finished.
    assert_eq!(chunks.next_chunk().unwrap(), None);
}

#[test]
fn error_before_any_output_yields_no_chunks() {
    let mut chunks = Transcoder::new().transcode_chunked(b"\x10\x00\x00\x00\x00".to_vec());
    assert_eq!(chunks.next_chunk(), Err(Error::SizeExceedsInput));
    assert_eq!(chunks.next_chunk().unwrap(), None);
}

#[test]
fn producer_is_lazy_until_first_pull() {
    // Dropping before pulling must not deadlock or panic even though the
    // producer never ran.
    let bytes = to_bytes(&sample_doc());
    let chunks = Transcoder::new().chunk_size(8).transcode_chunked(bytes);
    drop(chunks);
}
