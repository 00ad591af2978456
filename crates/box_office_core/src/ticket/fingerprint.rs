//! Request fingerprint for log correlation.
//!
//! `fingerprint = xxhash64(account_id + per line: category + count + discount_code)`
//!
//! No timestamps or process state feed the hash: identical requests always
//! produce the same value.

use xxhash_rust::xxh64::xxh64;

use super::types::PurchaseRequest;

const FIELD_SEPARATOR: u8 = 0xFF;
const NO_CODE_MARKER: u8 = 0xFE;

/// Compute the fingerprint of a purchase request.
pub fn request_fingerprint(request: &PurchaseRequest) -> u64 {
    let mut buf = Vec::with_capacity(16 + request.lines().len() * 24);

    buf.extend_from_slice(&request.account_id().to_le_bytes());
    for line in request.lines() {
        buf.push(FIELD_SEPARATOR);
        buf.extend_from_slice(line.category().as_str().as_bytes());
        buf.push(FIELD_SEPARATOR);
        buf.extend_from_slice(&line.count().to_le_bytes());
        buf.push(FIELD_SEPARATOR);
        // 0xFE/0xFF never occur in UTF-8, so "no code" and "" stay distinct.
        match line.discount_code() {
            Some(code) => buf.extend_from_slice(code.as_bytes()),
            None => buf.push(NO_CODE_MARKER),
        }
    }

    xxh64(&buf, 0)
}

/// Format a fingerprint as 16 lowercase hex characters.
pub fn format_request_hash(hash: u64) -> String {
    format!("{hash:016x}")
}
