//! CRC-64 (Cyclic Redundancy Check) implementation.
//!
//! Hamming decoding can silently miscorrect a codeword hit by two errors, so callers compare a
//! checksum of the message before encoding with one of the decoded message. This module provides
//! the CRC-64 variant built on the ISO 3309 (HDLC) polynomial `x^64 + x^4 + x^3 + x + 1`.
//!
//! # How CRCs Work
//!
//! CRC calculations treat data as a binary polynomial and perform modulo-2 division
//! by a generator polynomial, using the remainder as the checksum.
//!
//! # Examples
//!
//! ```
//! use hamming_ecc::ecc::crc::Crc64;
//!
//! let crc = Crc64::default().calculate(b"123456789");
//! assert_eq!(crc, 0xB909_56C7_75A4_1001);
//! ```

use std::fmt::{Display, Formatter};

/// CRC-64 with a byte-wise lookup table
#[derive(Debug, Clone)]
pub struct Crc64 {
    /// Name of the CRC algorithm
    name: &'static str,
    /// Generator polynomial, normal (MSB-first) form
    polynomial: u64,
    /// Initial value for CRC calculation
    initial_value: u64,
    /// Value to XOR with the final CRC value
    final_xor_value: u64,
    /// Lookup table, reflected form
    table: [u64; 256],
}

impl Default for Crc64 {
    /// CRC-64/GO-ISO, the CRC-64 defined with the ISO 3309 polynomial
    fn default() -> Self {
        Self::new_iso()
    }
}

impl Crc64 {
    /// Create a reflected CRC-64 with custom parameters
    pub fn new(
        name: &'static str,
        polynomial: u64,
        initial_value: u64,
        final_xor_value: u64,
    ) -> Self {
        Self {
            name,
            polynomial,
            initial_value,
            final_xor_value,
            table: Self::generate_table(polynomial.reverse_bits()),
        }
    }

    /// Create a CRC-64 using the ISO 3309 polynomial (0x1B)
    pub fn new_iso() -> Self {
        Self::new("CRC-64/GO-ISO", 0x1B, u64::MAX, u64::MAX)
    }

    fn generate_table(reflected_polynomial: u64) -> [u64; 256] {
        let mut table = [0u64; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = i as u64;
            for _ in 0..8 {
                crc = if crc & 1 != 0 {
                    (crc >> 1) ^ reflected_polynomial
                } else {
                    crc >> 1
                };
            }
            *entry = crc;
        }
        table
    }

    /// Calculate the CRC of `data`
    pub fn calculate(&self, data: &[u8]) -> u64 {
        let crc = data.iter().fold(self.initial_value, |crc, &byte| {
            self.table[((crc ^ byte as u64) & 0xFF) as usize] ^ (crc >> 8)
        });
        crc ^ self.final_xor_value
    }

    /// Verify that `data` has the expected checksum
    pub fn verify(&self, data: &[u8], expected_crc: u64) -> bool {
        self.calculate(data) == expected_crc
    }

    /// Gets the name of the CRC algorithm
    pub fn name(&self) -> &str {
        self.name
    }

    /// Gets the generator polynomial in normal form
    pub fn polynomial(&self) -> u64 {
        self.polynomial
    }
}

impl Display for Crc64 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (poly: 0x{:016X})", self.name, self.polynomial)
    }
}

/// Calculate the CRC-64/GO-ISO checksum of `data`
pub fn calculate_crc64(data: &[u8]) -> u64 {
    Crc64::default().calculate(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc64_iso_check_value() {
        assert_eq!(calculate_crc64(b"123456789"), 0xB909_56C7_75A4_1001);
    }

    #[test]
    fn test_crc64_empty() {
        // Init and final XOR cancel on empty input.
        assert_eq!(calculate_crc64(&[]), 0);
    }

    #[test]
    fn test_crc64_detects_single_bit_change() {
        let crc = Crc64::default();
        let checksum = crc.calculate(b"Hamming code");
        assert!(crc.verify(b"Hamming code", checksum));
        assert!(!crc.verify(b"Hamming codf", checksum));
    }

    #[test]
    fn test_crc64_display() {
        let crc = Crc64::new_iso();
        assert_eq!(crc.name(), "CRC-64/GO-ISO");
        assert_eq!(crc.polynomial(), 0x1B);
        assert_eq!(crc.to_string(), "CRC-64/GO-ISO (poly: 0x000000000000001B)");
    }
}
