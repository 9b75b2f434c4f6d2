//! Command-line interface for the `sec-aes` engines.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sec_aes::{SecAes, Version, BLOCK_SIZE};

/// FIPS-197 Appendix C plaintext.
const FIPS_PLAIN: &str = "00112233445566778899aabbccddeeff";

/// FIPS-197 Appendix C keys (sequential bytes) and expected ciphertexts.
const FIPS_VECTORS: [(usize, &str); 3] = [
    (16, "69c4e0d86a7b0430d8cdb78070b4c55a"),
    (24, "dda97ca4864cdfe06eaf70a0ec0d7191"),
    (32, "8ea2b7ca516745bfeafc49904b496089"),
];

/// AES CLI over the legacy and standard-operation backends.
#[derive(Parser)]
#[command(name = "sec-aes", version, author, about = "Raw per-block AES (legacy / SO)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// From-scratch engine on GF(2^8) log tables.
    Legacy,
    /// Standard-operation engine.
    So,
}

impl From<Backend> for Version {
    fn from(value: Backend) -> Self {
        match value {
            Backend::Legacy => Version::Legacy,
            Backend::So => Version::StandardOperation,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file block by block (no chaining, no padding).
    Enc {
        /// Backend to use.
        #[arg(long = "backend", value_enum, default_value_t = Backend::Legacy)]
        backend: Backend,
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file block by block.
    Dec {
        /// Backend to use.
        #[arg(long = "backend", value_enum, default_value_t = Backend::Legacy)]
        backend: Backend,
        /// AES key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Input file (ciphertext).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Check both backends against FIPS-197 vectors and against each other.
    Check {
        /// Number of random buffers to cross-check.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key and data, encrypt, decrypt back.
    Demo {
        /// Backend to use.
        #[arg(long = "backend", value_enum, default_value_t = Backend::Legacy)]
        backend: Backend,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            backend,
            key_hex,
            input,
            output,
        } => cmd_transform(backend.into(), &key_hex, &input, &output, true),
        Commands::Dec {
            backend,
            key_hex,
            input,
            output,
        } => cmd_transform(backend.into(), &key_hex, &input, &output, false),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { backend, seed } => cmd_demo(backend.into(), seed),
    }
}

fn cmd_transform(
    version: Version,
    key_hex: &str,
    input_path: &Path,
    output_path: &Path,
    encrypt: bool,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let mut aes = SecAes::new();
    aes.init_key(&key, version)
        .with_context(|| format!("initialize {version} key"))?;

    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.len() % BLOCK_SIZE != 0 {
        bail!("input length must be a multiple of {BLOCK_SIZE} bytes");
    }
    let mut out = vec![0u8; data.len()];
    if encrypt {
        aes.encrypt(&data, &mut out).context("encrypt")?;
    } else {
        aes.decrypt(&data, &mut out).context("decrypt")?;
    }
    fs::write(output_path, &out).with_context(|| format!("write {}", output_path.display()))?;
    info!(
        "{} {} bytes with the {version} backend",
        if encrypt { "encrypted" } else { "decrypted" },
        out.len()
    );
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    let plain = hex::decode(FIPS_PLAIN).context("decode plaintext")?;
    for version in [Version::Legacy, Version::StandardOperation] {
        for (len, expected) in FIPS_VECTORS {
            let key: Vec<u8> = (0..len as u8).collect();
            let mut aes = SecAes::new();
            aes.init_key(&key, version)?;
            let mut ct = vec![0u8; plain.len()];
            aes.encrypt(&plain, &mut ct)?;
            if hex::encode(&ct) != expected {
                bail!("{version} backend failed the AES-{} vector", len * 8);
            }
            let mut back = vec![0u8; ct.len()];
            aes.decrypt(&ct, &mut back)?;
            if back != plain {
                bail!("{version} backend failed to invert the AES-{} vector", len * 8);
            }
        }
        println!("{version}: FIPS-197 vectors ok");
    }

    let mut rng = seeded_rng(seed);
    for _ in 0..samples {
        let len = [16usize, 24, 32][(rng.next_u32() % 3) as usize];
        let blocks = 1 + (rng.next_u32() % 8) as usize;
        let mut key = vec![0u8; len];
        let mut data = vec![0u8; blocks * BLOCK_SIZE];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut data);

        let mut aes = SecAes::new();
        let mut legacy = vec![0u8; data.len()];
        let mut so = vec![0u8; data.len()];
        aes.init_key(&key, Version::Legacy)?;
        aes.encrypt(&data, &mut legacy)?;
        aes.init_key(&key, Version::StandardOperation)?;
        aes.encrypt(&data, &mut so)?;
        if legacy != so {
            bail!("legacy and SO backends disagree for a {}-byte key", len);
        }
    }
    println!("cross-check: {samples} random buffers agree");
    Ok(())
}

fn cmd_demo(version: Version, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 32];
    rng.fill_bytes(&mut key);
    let mut plain = [0u8; 2 * BLOCK_SIZE];
    rng.fill_bytes(&mut plain);

    let mut aes = SecAes::new();
    aes.init_key(&key, version)?;
    let mut cipher = [0u8; 2 * BLOCK_SIZE];
    aes.encrypt(&plain, &mut cipher)?;
    let mut decrypted = [0u8; 2 * BLOCK_SIZE];
    aes.decrypt(&cipher, &mut decrypted)?;

    println!("backend: {version}");
    println!("demo key: {}", hex::encode(key));
    println!("plaintext: {}", hex::encode(plain));
    println!("ciphertext: {}", hex::encode(cipher));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != plain {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if ![16, 24, 32].contains(&bytes.len()) {
        bail!(
            "AES key must be 16, 24 or 32 bytes (got {} bytes)",
            bytes.len()
        );
    }
    Ok(bytes)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => ChaCha20Rng::from_entropy(),
    }
}
