// rsa-pke command line tool
// Key generation, file encryption and signatures on top of the rsa_pke engine

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rsa_pke::util::{format_file_size, read_file, read_hex_file, write_file, write_hex_file};
use rsa_pke::{
    decrypt, encrypt, generate_keypair_with, sign, verify, Ciphertext, Config, KeyEncoding,
    RsaPrivateKey, RsaPublicKey, Signature,
};

/// Textbook RSA: key pairs, block encryption and signatures
#[derive(Parser)]
#[command(name = "rsa-pke")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full engine once: keys, hex round trip, encryption, signature
    Demo {
        /// Message to encrypt and sign
        #[arg(short, long, default_value = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.")]
        message: String,

        /// Bit length of each prime
        #[arg(long, default_value_t = rsa_pke::config::PRIME_BITS)]
        prime_bits: usize,
    },

    /// Generate a key pair and write <out>.pub and <out>.key as hex
    Keygen {
        /// Output path prefix
        #[arg(short, long)]
        out: PathBuf,

        /// Bit length of each prime
        #[arg(long, default_value_t = rsa_pke::config::PRIME_BITS)]
        prime_bits: usize,
    },

    /// Encrypt a file with a public key
    Encrypt {
        /// Public key file (hex)
        #[arg(short, long)]
        key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decrypt a file with a private key
    Decrypt {
        /// Private key file (hex)
        #[arg(short, long)]
        key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Sign a file and print the signature as hex
    Sign {
        /// Private key file (hex)
        #[arg(short, long)]
        key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Verify a hex signature over a file; exits with status 1 on mismatch
    Verify {
        /// Public key file (hex)
        #[arg(short, long)]
        key: PathBuf,
        #[arg(short, long)]
        input: PathBuf,
        /// Signature (hex)
        #[arg(short, long)]
        signature: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "rsa_pke=warn",
        1 => "rsa_pke=debug",
        _ => "rsa_pke=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns false when a verification did not pass
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Demo { message, prime_bits } => demo(&message, prime_bits),
        Commands::Keygen { out, prime_bits } => {
            keygen(&out, prime_bits)?;
            Ok(true)
        }
        Commands::Encrypt { key, input, output } => {
            let public_key: RsaPublicKey = load_key(&key)?;
            let plaintext = read_file(&input).with_context(|| format!("reading {}", input.display()))?;
            let ciphertext = encrypt(&plaintext, &public_key)?;
            let bytes = ciphertext.to_bytes();
            write_file(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
            info!(
                blocks = ciphertext.len(),
                size = %format_file_size(bytes.len() as u64),
                "encrypted"
            );
            Ok(true)
        }
        Commands::Decrypt { key, input, output } => {
            let private_key: RsaPrivateKey = load_key(&key)?;
            let bytes = read_file(&input).with_context(|| format!("reading {}", input.display()))?;
            let ciphertext = Ciphertext::from_bytes(&bytes).context("parsing ciphertext")?;
            let plaintext = decrypt(&ciphertext, &private_key)?;
            write_file(&output, &plaintext).with_context(|| format!("writing {}", output.display()))?;
            info!(size = %format_file_size(plaintext.len() as u64), "decrypted");
            Ok(true)
        }
        Commands::Sign { key, input } => {
            let private_key: RsaPrivateKey = load_key(&key)?;
            let data = read_file(&input).with_context(|| format!("reading {}", input.display()))?;
            println!("{}", sign(&data, &private_key)?.to_hex());
            Ok(true)
        }
        Commands::Verify { key, input, signature } => {
            let public_key: RsaPublicKey = load_key(&key)?;
            let data = read_file(&input).with_context(|| format!("reading {}", input.display()))?;
            let signature = Signature::from_hex(&signature).context("parsing signature")?;
            let verified = verify(&data, &signature, &public_key);
            println!("Verified: {}", verified);
            Ok(verified)
        }
    }
}

fn load_key<K: KeyEncoding>(path: &Path) -> Result<K> {
    let hex_str = read_hex_file(path).with_context(|| format!("reading key {}", path.display()))?;
    K::from_hex(&hex_str).with_context(|| format!("parsing key {}", path.display()))
}

fn keygen(out: &Path, prime_bits: usize) -> Result<()> {
    let config = Config::default().with_prime_bits(prime_bits);

    let started = Instant::now();
    let keypair = generate_keypair_with(&config)?;
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "key pair generated");

    let pub_path = with_suffix(out, "pub");
    let key_path = with_suffix(out, "key");
    write_hex_file(&pub_path, &keypair.public_key.to_hex())?;
    write_hex_file(&key_path, &keypair.private_key.to_hex())?;

    println!("Public key:  {}", pub_path.display());
    println!("Private key: {}", key_path.display());
    Ok(())
}

/// Append `.suffix` to the prefix, keeping any extension it already has
fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn demo(message: &str, prime_bits: usize) -> Result<bool> {
    let config = Config::default().with_prime_bits(prime_bits);

    println!("Generating key pair...");
    let started = Instant::now();
    let keypair = generate_keypair_with(&config)?;
    println!(
        "Generated {}-bit modulus in {:.2?}",
        keypair.modulus_bits(),
        started.elapsed()
    );

    // Keys survive a hex round trip
    let pubkey_hex = keypair.public_key.to_hex();
    let privkey_hex = keypair.private_key.to_hex();
    let pubkey = RsaPublicKey::from_hex(&pubkey_hex)?;
    let privkey = RsaPrivateKey::from_hex(&privkey_hex)?;
    if pubkey != keypair.public_key || privkey != keypair.private_key {
        bail!("key hex round trip changed the key");
    }

    let ciphertext = encrypt(message.as_bytes(), &pubkey)?;
    let decrypted = decrypt(&ciphertext, &privkey)?;
    println!("Decrypted: {}", String::from_utf8_lossy(&decrypted));

    let signature = sign(message.as_bytes(), &keypair.private_key)?;
    let signature_hex = signature.to_hex();
    println!("Signature: {}", signature_hex);
    let signature = Signature::from_hex(&signature_hex)?;
    let verified = verify(message.as_bytes(), &signature, &keypair.public_key);

    println!("Public Key: {}", pubkey_hex);
    println!("Private Key: {}", privkey_hex);
    println!("Verified: {}", verified);

    Ok(verified && decrypted == message.as_bytes())
}
