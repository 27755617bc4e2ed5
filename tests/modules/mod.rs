mod chunked;
mod props;

/// Serializes a document built with the `doc!` macro into its wire bytes.
pub fn to_bytes(doc: &bson::Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.to_writer(&mut bytes).unwrap();
    bytes
}

/// Builds a document from raw element bytes, adding the size prefix and the
/// terminator. Used where the input must be malformed in ways the `bson`
/// crate refuses to produce.
pub fn raw_doc(elements: &[u8]) -> Vec<u8> {
    let size = (elements.len() + 5) as i32;
    let mut doc = size.to_le_bytes().to_vec();
    doc.extend_from_slice(elements);
    doc.push(0);
    doc
}
