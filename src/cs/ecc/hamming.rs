//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! Every codeword carries parity bits at its power-of-two positions (1-indexed); parity bit `2^s`
//! covers every position whose index has bit `s` set. On decode the failed parity checks add up to
//! a syndrome naming the position of a single flipped bit.
//!
//! This implementation provides:
//! - Encoding of byte messages with a configurable number of data bits per codeword ("mode")
//! - Decoding with single-bit error correction, including errors in parity bits
//! - Counting of codewords whose syndrome points past the end of the codeword
//!
//! The wire format is a string of ASCII `'0'`/`'1'` digits, codewords concatenated in block order.
//! The mode is not recorded in the stream, so encoder and decoder must agree on it.
//!
//! Two flipped bits in one codeword are not detected reliably: the syndrome may name a wrong
//! position, which is then "corrected", or a position past the codeword, which is counted.

use crate::cs::ecc::Result;
use crate::error::Error;
use bitvec::prelude::*;
use std::cmp::min;

/// Data bits per codeword used when no mode is given.
pub const DEFAULT_MODE: usize = 8;

/// Number of parity bits used for `mode` data bits.
///
/// Computed as `ceil(log2(log2(mode + 1) + mode + 1))`, which gives 4 for mode 8 and 7 for mode
/// 120. Where `f64` rounding leaves the estimate short of `2^s - 1 >= mode + s`, it is raised
/// until the bound holds or no `usize` position could address the codeword.
pub fn parity_bit_count(mode: usize) -> usize {
    let estimate = {
        let mode = mode as f64;
        ((mode + 1.0).log2() + mode + 1.0).log2().ceil() as usize
    };

    let mut parity_bits = estimate;
    while parity_bits < usize::BITS as usize && !parity_positions_fit(mode, parity_bits) {
        parity_bits += 1;
    }
    parity_bits
}

/// Whether `parity_bits` positions address every bit of a `mode + parity_bits` codeword.
fn parity_positions_fit(mode: usize, parity_bits: usize) -> bool {
    if parity_bits >= usize::BITS as usize {
        return false;
    }
    match mode.checked_add(parity_bits) {
        Some(code_len) => (1usize << parity_bits) - 1 >= code_len,
        None => false,
    }
}

/// XOR of the parity group controlled by parity bit `2^parity_index`.
///
/// Starting at 1-indexed position `2^s`, takes `2^s` positions, skips `2^s`, and repeats until
/// the end of the codeword. The parity position itself is part of its group.
pub fn compute_group_xor(codeword: &BitSlice<u8, Msb0>, parity_index: usize) -> bool {
    let step = 1usize << parity_index;
    let len = codeword.len();

    let mut parity = false;
    let mut start = step;
    while start <= len {
        let end = min(start + step - 1, len);
        parity ^= codeword[start - 1..end].count_ones() % 2 == 1;
        start += step << 1;
    }
    parity
}

/// Writes every parity bit of `codeword`.
///
/// Parity positions must be cleared beforehand, otherwise their stale value leaks into the XOR.
pub fn fill_parity(codeword: &mut BitSlice<u8, Msb0>, parity_bits: usize) {
    for s in 0..parity_bits {
        let parity = compute_group_xor(codeword, s);
        codeword.set((1 << s) - 1, parity);
    }
}

/// Result of checking one codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Syndrome was zero.
    Clean,
    /// The bit at this 1-indexed position was flipped back.
    Corrected(usize),
    /// The syndrome named a position past the end of the codeword; nothing was changed.
    Uncorrectable(usize),
}

/// Sum of `2^s` over every parity group whose XOR is set.
fn syndrome(codeword: &BitSlice<u8, Msb0>, parity_bits: usize) -> usize {
    (0..parity_bits)
        .filter(|&s| compute_group_xor(codeword, s))
        .map(|s| 1usize << s)
        .sum()
}

/// Computes the syndrome of `codeword` and corrects the bit it names, if any.
///
/// A syndrome past the end of the codeword is reported as [`CheckOutcome::Uncorrectable`] and the
/// codeword is left untouched.
pub fn check_codeword(codeword: &mut BitSlice<u8, Msb0>, parity_bits: usize) -> CheckOutcome {
    let syndrome = syndrome(codeword, parity_bits);

    if syndrome == 0 {
        return CheckOutcome::Clean;
    }
    if syndrome > codeword.len() {
        return CheckOutcome::Uncorrectable(syndrome);
    }

    let flipped = !codeword[syndrome - 1];
    codeword.set(syndrome - 1, flipped);
    CheckOutcome::Corrected(syndrome)
}

/// A decoded message.
///
/// Decoding yields text when the recovered bytes are valid UTF-8 and falls back to the raw bytes
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Recovered bytes formed valid UTF-8.
    Text(String),
    /// Recovered bytes were not valid UTF-8.
    Bytes(Vec<u8>),
}

impl Decoded {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Decoded::Text(text),
            Err(err) => Decoded::Bytes(err.into_bytes()),
        }
    }

    /// The recovered bytes, whichever form they took.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Decoded::Text(text) => text.as_bytes(),
            Decoded::Bytes(bytes) => bytes,
        }
    }

    /// Gets the recovered bytes, consuming the message.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Decoded::Text(text) => text.into_bytes(),
            Decoded::Bytes(bytes) => bytes,
        }
    }

    /// The text, if the bytes were valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Decoded::Text(text) => Some(text),
            Decoded::Bytes(_) => None,
        }
    }

    /// Whether the recovered bytes were valid UTF-8.
    pub fn is_text(&self) -> bool {
        matches!(self, Decoded::Text(_))
    }
}

/// Message and uncorrectable-error count produced by a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// The recovered message, including any zero padding added at encode time
    pub message: Decoded,
    /// Number of codewords whose syndrome pointed past their end
    pub errors: usize,
}

impl DecodeOutcome {
    /// Splits into `(message, errors)`.
    pub fn into_parts(self) -> (Decoded, usize) {
        (self.message, self.errors)
    }
}

/// Decode result with per-call statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// The recovered message
    pub message: Decoded,
    /// Codewords whose syndrome pointed past their end
    pub errors: usize,
    /// Codewords in which one bit was flipped back
    pub corrected: usize,
    /// Complete codewords found in the stream
    pub codewords: usize,
    /// Trailing digits that did not fill a whole codeword and were ignored
    pub dropped_bits: usize,
}

impl From<DecodeReport> for DecodeOutcome {
    fn from(report: DecodeReport) -> Self {
        DecodeOutcome {
            message: report.message,
            errors: report.errors,
        }
    }
}

/// Parses the leading `len` digits of `stream` into bits.
pub(crate) fn parse_bits(stream: &str, len: usize) -> Result<BitVec<u8, Msb0>> {
    let mut bits = BitVec::with_capacity(len);
    for (index, &byte) in stream.as_bytes()[..len].iter().enumerate() {
        match byte {
            b'0' => bits.push(false),
            b'1' => bits.push(true),
            _ => {
                // Everything before `index` is ASCII, so it is a char boundary.
                let found = stream[index..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(Error::InvalidDigit { index, found });
            }
        }
    }
    Ok(bits)
}

/// Renders bits as a `'0'`/`'1'` digit string.
pub(crate) fn render_bits(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Represents a Hamming code configuration.
/// Each codeword holds `data_bits` data bits and `parity_bits` parity bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HammingCode {
    /// Number of data bits per codeword (the mode)
    data_bits: usize,
    /// Number of parity bits per codeword
    parity_bits: usize,
}

impl Default for HammingCode {
    fn default() -> Self {
        HammingCode {
            data_bits: DEFAULT_MODE,
            parity_bits: parity_bit_count(DEFAULT_MODE),
        }
    }
}

impl HammingCode {
    /// Creates a new Hamming code configuration.
    ///
    /// # Arguments
    ///
    /// * `mode` - Number of data bits in each codeword
    ///
    /// # Returns
    ///
    /// A new `HammingCode` instance, or an error if `mode` is zero or too large for its codeword
    /// positions to fit in a `usize`
    pub fn new(mode: usize) -> Result<Self> {
        if mode == 0 {
            return Err(Error::InvalidInput(
                "Data bits per codeword must be positive".to_string(),
            ));
        }

        let parity_bits = parity_bit_count(mode);
        if !parity_positions_fit(mode, parity_bits) {
            return Err(Error::InvalidInput(format!(
                "Data bits per codeword too large to address: {}",
                mode
            )));
        }

        Ok(HammingCode {
            data_bits: mode,
            parity_bits,
        })
    }

    /// Gets the number of data bits per codeword (the mode)
    pub fn data_bits(&self) -> usize {
        self.data_bits
    }

    /// Gets the number of parity bits per codeword
    pub fn parity_bits(&self) -> usize {
        self.parity_bits
    }

    /// Gets the codeword length (data bits + parity bits)
    ///
    /// Cannot overflow: `new` only accepts modes where `2^parity_bits - 1` bounds this sum.
    pub fn code_len(&self) -> usize {
        self.data_bits + self.parity_bits
    }

    /// Gets the length of the digit string produced for `message_len` input bytes, or `None` if
    /// it does not fit in a `usize`
    pub fn encoded_len(&self, message_len: usize) -> Option<usize> {
        message_len
            .checked_mul(8)?
            .div_ceil(self.data_bits)
            .checked_mul(self.code_len())
    }

    /// Encodes a byte slice into a digit string
    ///
    /// The message bits (most significant bit of each byte first) are zero-padded to a whole
    /// number of data blocks; each block becomes one codeword.
    pub fn encode(&self, message: &[u8]) -> String {
        let data_bits = message.view_bits::<Msb0>();
        let code_len = self.code_len();
        let blocks = data_bits.len().div_ceil(self.data_bits);

        let mut encoded = bitvec![u8, Msb0; 0; blocks * code_len];

        for block_idx in 0..blocks {
            let input_start = block_idx * self.data_bits;
            let input_end = min(input_start + self.data_bits, data_bits.len());
            let output_start = block_idx * code_len;

            let codeword = &mut encoded[output_start..output_start + code_len];
            self.layout_block(&data_bits[input_start..input_end], codeword);
            fill_parity(codeword, self.parity_bits);
        }

        log::debug!(
            "hamming encode: {} bytes into {} codewords of {} bits",
            message.len(),
            blocks,
            code_len
        );

        render_bits(&encoded)
    }

    /// Places data bits at the non-parity positions of a zeroed codeword.
    ///
    /// A short `data` slice leaves the remaining data positions zero.
    fn layout_block(&self, data: &BitSlice<u8, Msb0>, codeword: &mut BitSlice<u8, Msb0>) {
        let mut data = data.iter().by_vals();
        for position in 1..=codeword.len() {
            if position.is_power_of_two() {
                continue;
            }
            match data.next() {
                Some(bit) => codeword.set(position - 1, bit),
                None => break,
            }
        }
    }

    /// Appends the data positions of `codeword` to `out`.
    fn extract_data(&self, codeword: &BitSlice<u8, Msb0>, out: &mut BitVec<u8, Msb0>) {
        out.extend(
            codeword
                .iter()
                .by_vals()
                .enumerate()
                .filter(|(index, _)| !(index + 1).is_power_of_two())
                .map(|(_, bit)| bit),
        );
    }

    /// Decodes a digit string, correcting single-bit errors
    ///
    /// # Returns
    ///
    /// The recovered message and the number of codewords with an uncorrectable syndrome
    pub fn decode(&self, stream: &str) -> Result<DecodeOutcome> {
        self.decode_report(stream).map(DecodeOutcome::from)
    }

    /// Decodes a digit string and reports what happened to each codeword
    ///
    /// Digits past the last complete codeword are ignored. Bits that do not fill a whole byte at
    /// the end of the recovered data are dropped.
    pub fn decode_report(&self, stream: &str) -> Result<DecodeReport> {
        let code_len = self.code_len();
        let codewords = stream.len() / code_len;
        let used = codewords * code_len;

        let mut encoded = parse_bits(stream, used)?;
        let dropped_bits = stream[used..].chars().count();
        if dropped_bits > 0 {
            log::debug!(
                "hamming decode: ignoring {} trailing digits after {} codewords",
                dropped_bits,
                codewords
            );
        }

        let mut data = BitVec::<u8, Msb0>::with_capacity(codewords * self.data_bits);
        let mut errors = 0;
        let mut corrected = 0;

        for block_idx in 0..codewords {
            let start = block_idx * code_len;
            let codeword = &mut encoded[start..start + code_len];

            match check_codeword(codeword, self.parity_bits) {
                CheckOutcome::Clean => {}
                CheckOutcome::Corrected(position) => {
                    log::trace!("codeword {}: corrected bit {}", block_idx, position);
                    corrected += 1;
                }
                CheckOutcome::Uncorrectable(syndrome) => {
                    log::trace!(
                        "codeword {}: syndrome {} exceeds length {}",
                        block_idx,
                        syndrome,
                        code_len
                    );
                    errors += 1;
                }
            }

            self.extract_data(codeword, &mut data);
        }

        if errors > 0 {
            log::warn!(
                "hamming decode: {} of {} codewords had uncorrectable errors",
                errors,
                codewords
            );
        }

        data.truncate(data.len() / 8 * 8);
        let message = Decoded::from_bytes(data.as_raw_slice().to_vec());

        Ok(DecodeReport {
            message,
            errors,
            corrected,
            codewords,
            dropped_bits,
        })
    }
}

/// Encodes `message` with `mode` data bits per codeword
pub fn hamming_encode(message: &[u8], mode: usize) -> Result<String> {
    Ok(HammingCode::new(mode)?.encode(message))
}

/// Decodes `stream` with `mode` data bits per codeword
pub fn hamming_decode(stream: &str, mode: usize) -> Result<DecodeOutcome> {
    HammingCode::new(mode)?.decode(stream)
}
