//! Sends a text through a clean channel, a channel with one flipped bit per codeword and a
//! channel with up to two flipped bits per codeword, then compares CRC-64 checksums.
//!
//! Usage: `hamming_demo [mode] [seed]` (mode defaults to 120 data bits per codeword).

use hamming_ecc::{calculate_crc64, Channel, Decoded, Error, HammingCode, Result};
use std::env;

const DEFAULT_DEMO_MODE: usize = 120;

const MESSAGE: &str = "A Hamming code places parity bits at every power-of-two position of a \
codeword. Each parity bit covers the positions whose index has its bit set, so a single flipped \
bit fails exactly the checks that spell out its position in binary. Two flipped bits fail the \
checks of a third position, which is then corrected by mistake, unless that position lies past \
the end of the codeword. Ünïcödé survives the trip as long as no codeword is hit twice.";

fn parse_arg<T: std::str::FromStr>(value: Option<String>, name: &str) -> Result<Option<T>> {
    value
        .map(|raw| {
            raw.parse()
                .map_err(|_| Error::invalid(format!("{} must be a non-negative integer", name)))
        })
        .transpose()
}

fn strip_padding(decoded: &Decoded) -> &[u8] {
    let bytes = decoded.as_bytes();
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

fn report(title: &str, code: &HammingCode, stream: &str, checksum: u64) -> Result<()> {
    let decoded = code.decode_report(stream)?;
    let message = strip_padding(&decoded.message);

    println!("{}", title);
    println!("Encoded digits: {}", stream.len());
    println!("Decoded message:\n{}", String::from_utf8_lossy(message));
    println!("Checksum: {:016X}", calculate_crc64(message));
    println!("Checksums match: {}", calculate_crc64(message) == checksum);
    println!("Texts match: {}", message == MESSAGE.as_bytes());
    println!("Corrected codewords: {}", decoded.corrected);
    println!("Detected errors: {}", decoded.errors);
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let mode = parse_arg(args.next(), "mode")?.unwrap_or(DEFAULT_DEMO_MODE);
    let seed: Option<u64> = parse_arg(args.next(), "seed")?;

    let code = HammingCode::new(mode)?;
    let mut channel = match seed {
        Some(seed) => Channel::with_seed(mode, seed)?,
        None => Channel::new(mode)?,
    };

    let checksum = calculate_crc64(MESSAGE.as_bytes());
    println!("Original message:\n{}", MESSAGE);
    println!("Checksum: {:016X}", checksum);
    println!(
        "Mode: {} data bits + {} parity bits per codeword",
        code.data_bits(),
        code.parity_bits()
    );
    println!();

    let encoded = code.encode(MESSAGE.as_bytes());
    report("Clean channel", &code, &encoded, checksum)?;

    let noisy = channel.single_fault(&encoded)?;
    report("At most one error per codeword", &code, &noisy, checksum)?;

    let noisy = channel.double_fault(&encoded)?;
    report("Up to two errors per codeword", &code, &noisy, checksum)?;

    Ok(())
}
