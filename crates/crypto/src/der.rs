// Path: crates/crypto/src/der.rs
//! A minimal DER writer covering the three types block headers need:
//! INTEGER, OCTET STRING and SEQUENCE.
//!
//! Lengths use the definite form (short form below 128, long form above) and
//! integers use the minimal two's-complement encoding, so the output is the
//! unique DER encoding of the value.

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_SEQUENCE: u8 = 0x30;

/// Appends a definite-form length.
fn write_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    let significant = bytes.get(skip..).unwrap_or_default();
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
}

fn write_tlv(out: &mut Vec<u8>, tag: u8, content: &[u8]) {
    out.push(tag);
    write_length(out, content.len());
    out.extend_from_slice(content);
}

/// Encodes a non-negative integer as a DER INTEGER.
pub fn integer(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    // Keep at least one byte so zero encodes as 0x00.
    let skip = bytes
        .iter()
        .take(bytes.len() - 1)
        .take_while(|b| **b == 0)
        .count();
    let significant = bytes.get(skip..).unwrap_or_default();

    let mut content = Vec::with_capacity(significant.len() + 1);
    // A set high bit would read back as negative; pad with a zero byte.
    if significant.first().is_some_and(|b| b & 0x80 != 0) {
        content.push(0);
    }
    content.extend_from_slice(significant);

    let mut out = Vec::with_capacity(content.len() + 2);
    write_tlv(&mut out, TAG_INTEGER, &content);
    out
}

/// Encodes raw bytes as a DER OCTET STRING.
pub fn octet_string(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 4);
    write_tlv(&mut out, TAG_OCTET_STRING, value);
    out
}

/// Wraps already-encoded elements in a DER SEQUENCE, in the order given.
pub fn sequence(elements: &[Vec<u8>]) -> Vec<u8> {
    let content: Vec<u8> = elements.concat();
    let mut out = Vec::with_capacity(content.len() + 4);
    write_tlv(&mut out, TAG_SEQUENCE, &content);
    out
}
