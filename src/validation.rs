// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet address syntax checks.
//!
//! The landing page runs the same check before submitting; the server always
//! re-checks because client-side validation cannot be trusted.

/// Number of hex digits following the `0x` prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// Returns `true` when `candidate` is `0x` followed by exactly 40 hex digits.
///
/// Hex digits are accepted in either case. No checksum is verified.
pub fn is_valid_address(candidate: &str) -> bool {
    match candidate.strip_prefix("0x") {
        Some(hex) => hex.len() == ADDRESS_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_addresses_in_any_case() {
        assert!(is_valid_address("0x742d35cc6634c0532925a3b844bc9e7595f4ab12"));
        assert!(is_valid_address("0x742D35CC6634C0532925A3B844BC9E7595F4AB12"));
        assert!(is_valid_address("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12"));
        assert!(is_valid_address(&format!("0x{}", "0".repeat(40))));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("0x742d35cc6634c0532925a3b844bc9e7595f4ab1"));
        assert!(!is_valid_address("0x742d35cc6634c0532925a3b844bc9e7595f4ab123"));
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!(!is_valid_address("742d35cc6634c0532925a3b844bc9e7595f4ab1234"));
        assert!(!is_valid_address("0X742d35cc6634c0532925a3b844bc9e7595f4ab12"));
        assert!(!is_valid_address(" 0x742d35cc6634c0532925a3b844bc9e7595f4ab12"));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(!is_valid_address("0x742d35cc6634c0532925a3b844bc9e7595f4ab1g"));
        assert!(!is_valid_address("0x742d35cc6634c0532925a3b844bc9e7595f4ab1 "));
        // Multi-byte characters must not slip through a byte-length check.
        assert!(!is_valid_address("0x742d35cc6634c0532925a3b844bc9e7595f4abé"));
        assert!(!is_valid_address(""));
    }
}
