//! Checksum utilities for interactor and interaction records
//!
//! Two digests travel in MITAB checksum columns: the SwissProt-style CRC64
//! over an interactor's sequence, and a RIGID-style digest identifying an
//! interaction by the set of its interactor identities irrespective of order.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// CRC-64 polynomial used by SwissProt sequence checksums (ISO 3309,
/// x^64 + x^4 + x^3 + x + 1, reflected).
const CRC64_POLY: u64 = 0xD800_0000_0000_0000;

fn crc64_table() -> &'static [u64; 256] {
    static TABLE: OnceLock<[u64; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0u64; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = i as u64;
            for _ in 0..8 {
                if crc & 1 == 1 {
                    crc = (crc >> 1) ^ CRC64_POLY;
                } else {
                    crc >>= 1;
                }
            }
            *entry = crc;
        }
        table
    })
}

/// Compute the CRC64 checksum of `data`, rendered as 16 uppercase hex digits
pub fn crc64(data: &[u8]) -> String {
    let table = crc64_table();
    let mut crc = 0u64;
    for &byte in data {
        let idx = ((crc ^ byte as u64) & 0xFF) as usize;
        crc = table[idx] ^ (crc >> 8);
    }
    format!("{:016X}", crc)
}

/// Compute a RIGID-style interaction digest from interactor identity strings.
///
/// Identities are sorted before hashing so the digest is independent of
/// participant order. Output is url-safe base64 without padding.
pub fn rigid<I, S>(identities: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<String> = identities
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    sorted.sort();

    let mut hasher = Sha256::new();
    for identity in &sorted {
        hasher.update(identity.as_bytes());
        hasher.update(b"\n");
    }
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc64_known_vector() {
        // Reference vector from the original SPcrc implementation
        assert_eq!(crc64(b"IHATEMATH"), "E3DCADD69B01ADD1");
    }

    #[test]
    fn test_crc64_empty() {
        assert_eq!(crc64(b""), "0000000000000000");
    }

    #[test]
    fn test_crc64_differs_on_content() {
        assert_ne!(crc64(b"MKTAYIAKQR"), crc64(b"MKTAYIAKQK"));
    }

    #[test]
    fn test_rigid_order_independent() {
        let a = rigid(["uniprotkb:P12345", "uniprotkb:Q67890"]);
        let b = rigid(["uniprotkb:Q67890", "uniprotkb:P12345"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rigid_distinguishes_sets() {
        let a = rigid(["uniprotkb:P12345", "uniprotkb:Q67890"]);
        let b = rigid(["uniprotkb:P12345", "uniprotkb:Q67891"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_rigid_is_url_safe() {
        let digest = rigid(["uniprotkb:P12345"]);
        assert!(!digest.contains('+'));
        assert!(!digest.contains('/'));
        assert!(!digest.contains('='));
    }
}
