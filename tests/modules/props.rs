use bson::{doc, oid::ObjectId};
use bson2json::to_json;
use proptest::prelude::*;

use super::{raw_doc, to_bytes};

/// Byte-at-a-time oracle for the JSON string escaping rules.
fn naive_escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for &b in bytes {
        match b {
            0x08 => out.extend_from_slice(b"\\b"),
            0x09 => out.extend_from_slice(b"\\t"),
            0x0A => out.extend_from_slice(b"\\n"),
            0x0C => out.extend_from_slice(b"\\f"),
            0x0D => out.extend_from_slice(b"\\r"),
            0x22 => out.extend_from_slice(b"\\\""),
            0x5C => out.extend_from_slice(b"\\\\"),
            b if b < 0x20 => out.extend_from_slice(format!("\\u{:04x}", b).as_bytes()),
            b => out.push(b),
        }
    }
    out
}

/// A document with a single string element "s" holding arbitrary bytes,
/// interior nulls included.
fn string_doc(bytes: &[u8]) -> Vec<u8> {
    let mut elements = vec![0x02];
    elements.extend_from_slice(b"s\0");
    elements.extend_from_slice(&(bytes.len() as i32 + 1).to_le_bytes());
    elements.extend_from_slice(bytes);
    elements.push(0);
    raw_doc(&elements)
}

proptest! {
    #[test]
    fn escapes_match_the_reference(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let json = to_json(&string_doc(&bytes), false).unwrap();
        let mut expected = b"{\"s\":\"".to_vec();
        expected.extend_from_slice(&naive_escape(&bytes));
        expected.extend_from_slice(b"\"}");
        prop_assert_eq!(json, expected);
    }

    #[test]
    fn strings_survive_a_json_round_trip(s in any::<String>()) {
        let bytes = to_bytes(&doc! { "s": s.clone() });
        let json = to_json(&bytes, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        prop_assert_eq!(parsed["s"].as_str(), Some(s.as_str()));
    }

    #[test]
    fn finite_doubles_round_trip_exactly(value in any::<f64>()) {
        prop_assume!(value.is_finite());
        let bytes = to_bytes(&doc! { "d": value });
        let json = to_json(&bytes, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let reparsed = parsed["d"].as_f64().unwrap();
        prop_assert!(reparsed == value, "{} reparsed as {}", value, reparsed);
    }

    #[test]
    fn int32_values_round_trip(value in any::<i32>()) {
        let bytes = to_bytes(&doc! { "i": value });
        let json = to_json(&bytes, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        prop_assert_eq!(parsed["i"].as_i64(), Some(i64::from(value)));
    }

    #[test]
    fn int64_values_round_trip(value in any::<i64>()) {
        let bytes = to_bytes(&doc! { "i": value });
        let json = to_json(&bytes, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        prop_assert_eq!(parsed["i"].as_i64(), Some(value));
    }

    #[test]
    fn object_id_hex_is_faithful(raw in any::<[u8; 12]>()) {
        let id = ObjectId::from_bytes(raw);
        let bytes = to_bytes(&doc! { "id": id });
        let json = to_json(&bytes, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let hex = id.to_hex();
        prop_assert_eq!(parsed["id"].as_str(), Some(hex.as_str()));
    }

    #[test]
    fn key_names_are_escaped_too(key in "[a-z\"\\\\\t]{1,12}") {
        let bytes = to_bytes(&doc! { key.clone(): 1 });
        let json = to_json(&bytes, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        prop_assert_eq!(parsed[&key].as_i64(), Some(1));
    }
}
