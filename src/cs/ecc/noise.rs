//! Channel noise for Hamming-encoded digit streams.
//!
//! Flips one or two bits in every codeword of an encoded stream. The random positions come from a
//! [`PositionSource`], which every `rand::Rng` implements, so tests can pass a seeded generator.
//!
//! Only complete codewords are emitted; a trailing partial codeword is dropped.

use crate::cs::ecc::hamming::{parse_bits, render_bits, HammingCode};
use crate::cs::ecc::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Supplies the positions to flip.
pub trait PositionSource {
    /// Returns a position in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> PositionSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

fn inject_faults<S>(stream: &str, mode: usize, source: &mut S, faults: usize) -> Result<String>
where
    S: PositionSource + ?Sized,
{
    let code_len = HammingCode::new(mode)?.code_len();
    let codewords = stream.len() / code_len;
    let mut bits = parse_bits(stream, codewords * code_len)?;

    for block_idx in 0..codewords {
        let start = block_idx * code_len;
        let codeword = &mut bits[start..start + code_len];
        for _ in 0..faults {
            let position = source.pick(code_len);
            let flipped = !codeword[position];
            codeword.set(position, flipped);
        }
    }

    log::debug!(
        "noise: flipped {} positions in each of {} codewords",
        faults,
        codewords
    );

    Ok(render_bits(&bits))
}

/// Flips one random position in every codeword of `stream`.
pub fn inject_single_fault<S>(stream: &str, mode: usize, source: &mut S) -> Result<String>
where
    S: PositionSource + ?Sized,
{
    inject_faults(stream, mode, source, 1)
}

/// Flips two independently drawn positions in every codeword of `stream`.
///
/// When both draws land on the same position the two flips cancel and the codeword is unchanged.
pub fn inject_double_fault<S>(stream: &str, mode: usize, source: &mut S) -> Result<String>
where
    S: PositionSource + ?Sized,
{
    inject_faults(stream, mode, source, 2)
}

/// A noisy channel for one mode, driven by its own ChaCha generator.
#[derive(Debug, Clone)]
pub struct Channel {
    mode: usize,
    rng: ChaCha20Rng,
}

impl Channel {
    /// Create a channel seeded from OS entropy
    pub fn new(mode: usize) -> Result<Self> {
        HammingCode::new(mode)?;
        Ok(Self {
            mode,
            rng: ChaCha20Rng::from_entropy(),
        })
    }

    /// Create a channel with a fixed seed, for reproducible runs
    pub fn with_seed(mode: usize, seed: u64) -> Result<Self> {
        HammingCode::new(mode)?;
        Ok(Self {
            mode,
            rng: ChaCha20Rng::seed_from_u64(seed),
        })
    }

    /// Gets the number of data bits per codeword
    pub fn mode(&self) -> usize {
        self.mode
    }

    /// Flips one random position in every codeword of `stream`
    pub fn single_fault(&mut self, stream: &str) -> Result<String> {
        inject_single_fault(stream, self.mode, &mut self.rng)
    }

    /// Flips two random positions, possibly the same one, in every codeword of `stream`
    pub fn double_fault(&mut self, stream: &str) -> Result<String> {
        inject_double_fault(stream, self.mode, &mut self.rng)
    }
}
