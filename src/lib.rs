//! Binary Hamming codes for byte messages.
//!
//! Messages are split into fixed-size data blocks, each block gets parity
//! bits at its power-of-two positions, and the resulting codewords travel as
//! a string of `'0'`/`'1'` digits. Decoding corrects at most one flipped bit
//! per codeword and counts codewords whose syndrome points past their end.
//!
//! ```
//! use hamming_ecc::{hamming_decode, hamming_encode};
//!
//! let stream = hamming_encode(b"AB", 8).unwrap();
//! let (message, errors) = hamming_decode(&stream, 8).unwrap().into_parts();
//! assert_eq!(message.as_bytes(), b"AB");
//! assert_eq!(errors, 0);
//! ```

pub mod cs;
pub mod error;

pub use cs::ecc;
pub use cs::ecc::{
    calculate_crc64, hamming_decode, hamming_encode, inject_double_fault, inject_single_fault,
    Channel, Crc64, DecodeOutcome, DecodeReport, Decoded, HammingCode, PositionSource,
};
pub use error::{Error, Result};
