use clap::{Parser, Subcommand};
use kscan::payload::segment::encode_byte_segment;
use kscan::{ByteModeDecoder, CountWidth, KscanError, extract_raw_bytes_batch};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kscantool", version, about = "kscan payload tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract byte-mode bytes from a hex-encoded error-corrected payload
    Decode {
        #[arg(long)]
        hex: String,
        /// Force a count field width instead of probing both
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
        version: Option<u8>,
    },
    /// Encode text as a byte-mode segment and print it as hex
    Encode {
        #[arg(long)]
        text: String,
        /// Use the 16-bit count field (versions 10-40)
        #[arg(long)]
        wide: bool,
    },
    /// Decode a file of hex payloads, one per line
    Batch {
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Decode { hex, version } => decode_cmd(&hex, version),
        Command::Encode { text, wide } => encode_cmd(&text, wide),
        Command::Batch { file } => batch_cmd(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("kscantool: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, KscanError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(hex::decode(cleaned)?)
}

fn print_bytes(bytes: &[u8]) {
    println!("  length: {}", bytes.len());
    println!("  hex:    {}", hex::encode(bytes));
    println!("  text:   {:?}", String::from_utf8_lossy(bytes));
}

fn decode_cmd(text: &str, version: Option<u8>) -> Result<(), KscanError> {
    let payload = parse_hex(text)?;
    let decoder = ByteModeDecoder::new();
    let result = match version {
        Some(v) => decoder.decode_with_width(&payload, CountWidth::for_version(v)),
        None => decoder.decode(&payload),
    };

    match result {
        Some(bytes) => {
            println!("Byte mode payload:");
            print_bytes(&bytes);
        }
        None => println!("No byte mode payload (fall back to the engine's string value)"),
    }
    Ok(())
}

fn encode_cmd(text: &str, wide: bool) -> Result<(), KscanError> {
    let width = if wide {
        CountWidth::Wide
    } else {
        CountWidth::Narrow
    };
    let encoded = encode_byte_segment(text.as_bytes(), width).ok_or(KscanError::Encode {
        len: text.len(),
        width: width.bits(),
    })?;
    println!("{}", hex::encode(encoded));
    Ok(())
}

fn batch_cmd(path: &Path) -> Result<(), KscanError> {
    let content = std::fs::read_to_string(path)?;
    let payloads = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_hex)
        .collect::<Result<Vec<_>, _>>()?;

    let start = Instant::now();
    let results = extract_raw_bytes_batch(&payloads);
    let elapsed = start.elapsed();

    let mut extracted = 0usize;
    for (i, result) in results.iter().enumerate() {
        match result {
            Some(bytes) => {
                extracted += 1;
                println!("Payload {i}:");
                print_bytes(bytes);
            }
            None => println!("Payload {i}: no byte mode payload"),
        }
    }
    println!(
        "Extracted {}/{} payloads in {:.2?}",
        extracted,
        results.len(),
        elapsed
    );
    Ok(())
}
