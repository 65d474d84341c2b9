//! Error correction code implementations.
//!
//! This module provides:
//! - Hamming single-error-correcting codes over `'0'`/`'1'` digit streams
//! - Channel noise injection for exercising the decoder
//! - CRC-64 checksums for end-to-end integrity checks
//!
//! # Examples
//!
//! ```rust
//! use hamming_ecc::ecc::{Channel, HammingCode};
//!
//! let code = HammingCode::new(8).unwrap();
//! let stream = code.encode(b"habr");
//!
//! let mut channel = Channel::with_seed(8, 7).unwrap();
//! let noisy = channel.single_fault(&stream).unwrap();
//!
//! let outcome = code.decode(&noisy).unwrap();
//! assert_eq!(outcome.message.as_bytes(), b"habr");
//! assert_eq!(outcome.errors, 0);
//! ```

use crate::error::Error;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// CRC-64 checksums
pub mod crc;
/// Hamming codes
pub mod hamming;
/// Channel noise injection
pub mod noise;

pub use crc::{calculate_crc64, Crc64};
pub use hamming::{
    check_codeword, compute_group_xor, fill_parity, hamming_decode, hamming_encode,
    parity_bit_count, CheckOutcome, DecodeOutcome, DecodeReport, Decoded, HammingCode,
    DEFAULT_MODE,
};
pub use noise::{inject_double_fault, inject_single_fault, Channel, PositionSource};
