//! The `litauth` command line interface.
//!
//! All commands write their results to the given writer and return errors to
//! the caller. Only `main` decides the process exit code.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use litauth_account::{Account, Config, HexKey, KeySource};
use litauth_sign::RecoverError;
use litauth_types::AuthSig;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Sign in to an Ethereum-compatible network with a local wallet.
#[derive(Parser, Debug)]
#[command(name = "litauth", version)]
pub struct Cli {
    /// Directory containing the `.litauth` settings directory.
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,
    /// Log filter directive, e.g. `info` or `litauth_sign=trace`.
    #[arg(long, global = true, value_name = "FILTER", env = "RUST_LOG", default_value = "warn")]
    pub log: String,
    #[command(subcommand)]
    pub command: Command,
}

/// The available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save the network settings and private key.
    Init(Init),
    /// Print the address of the configured wallet.
    Address,
    /// Produce an auth signature and print it as JSON.
    Sign(Sign),
    /// Recover the address that signed a message.
    Recover(Recover),
    /// Check that an auth signature was produced by its claimed address.
    Verify(Verify),
}

/// Arguments for `init`.
#[derive(Args, Debug)]
pub struct Init {
    /// Name of the network, e.g. `ethereum`, `polygon` or `mumbai`.
    #[arg(long)]
    pub network: String,
    /// Chain id to use. Required for networks without a known chain id.
    #[arg(long)]
    pub chain_id: Option<String>,
    /// Hex-encoded private key of an EVM compatible wallet.
    #[arg(long, env = "LITAUTH_PRIVATE_KEY", hide_env_values = true)]
    pub key: String,
    /// Overwrite existing settings.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `sign`.
#[derive(Args, Debug)]
pub struct Sign {
    /// Free-text statement to include in the challenge.
    #[arg(long, default_value = "")]
    pub statement: String,
}

/// Arguments for `recover`.
#[derive(Args, Debug)]
pub struct Recover {
    /// The `0x`-prefixed hex signature.
    #[arg(long)]
    pub sig: String,
    #[command(flatten)]
    pub message: Message,
}

/// The signed plaintext, given inline or as a file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Message {
    /// The signed plaintext.
    #[arg(long)]
    pub message: Option<String>,
    /// A file containing the signed plaintext, read verbatim.
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,
}

/// Arguments for `verify`.
#[derive(Args, Debug)]
pub struct Verify {
    /// A JSON file containing the auth signature.
    #[arg(long, value_name = "PATH")]
    pub auth_sig: PathBuf,
}

/// The result of a command that completed without error.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded.
    Success,
    /// The auth signature did not match its claimed address.
    Mismatch,
}

/// Run a parsed command, writing its output to `out`.
pub fn run(cli: Cli, out: &mut impl io::Write) -> anyhow::Result<Outcome> {
    let root = cli.dir.as_path();
    match cli.command {
        Command::Init(args) => init(root, args, out),
        Command::Address => {
            let account = load_account(root)?;
            writeln!(out, "{}", account.address())?;
            Ok(Outcome::Success)
        }
        Command::Sign(args) => sign(root, args, out),
        Command::Recover(args) => recover(args, out),
        Command::Verify(args) => verify(args, out),
    }
}

fn init(root: &Path, args: Init, out: &mut impl io::Write) -> anyhow::Result<Outcome> {
    if Config::is_initialized(root) && !args.force {
        bail!(
            "already initialized in {}, pass --force to overwrite",
            root.display()
        );
    }
    let config = match args.chain_id {
        Some(chain_id) => Config::with_chain_id(args.network.trim(), chain_id.trim()),
        None => Config::new(args.network.trim())?,
    };
    let sk = HexKey(args.key)
        .secret_key()
        .context("invalid private key")?;
    config.save(root)?;
    Config::key_file(root).save(&sk)?;

    let account = Account::from_key_source(&sk)?;
    tracing::info!(network = %config.network, chain_id = %config.chain_id, "initialized");
    writeln!(out, "Ethereum wallet loaded: {}", account.address())?;
    Ok(Outcome::Success)
}

fn sign(root: &Path, args: Sign, out: &mut impl io::Write) -> anyhow::Result<Outcome> {
    let config = Config::load(root).context("not initialized, run `init` first")?;
    let account = load_account(root)?;
    let auth_sig = account.auth_sig(&config.chain_id, &args.statement);
    serde_json::to_writer_pretty(&mut *out, auth_sig)?;
    writeln!(out)?;
    Ok(Outcome::Success)
}

fn recover(args: Recover, out: &mut impl io::Write) -> anyhow::Result<Outcome> {
    let message = match (args.message.message, args.message.message_file) {
        (Some(message), _) => message,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("one of --message or --message-file is required"),
    };
    let address = litauth_sign::recover_address(&args.sig, &message)?;
    writeln!(out, "{address}")?;
    Ok(Outcome::Success)
}

fn verify(args: Verify, out: &mut impl io::Write) -> anyhow::Result<Outcome> {
    let json = fs::read_to_string(&args.auth_sig)
        .with_context(|| format!("failed to read {}", args.auth_sig.display()))?;
    let auth_sig: AuthSig = serde_json::from_str(&json).context("invalid auth signature JSON")?;
    let outcome = match litauth_sign::verify(&auth_sig) {
        Ok(true) => Outcome::Success,
        Ok(false) => Outcome::Mismatch,
        Err(err @ (RecoverError::Secp256k1(_) | RecoverError::InvalidRecoveryId(_))) => {
            tracing::debug!(%err, "recovery failed");
            Outcome::Mismatch
        }
        Err(err) => return Err(err).context("malformed auth signature"),
    };
    match outcome {
        Outcome::Success => writeln!(out, "valid: signed by {}", auth_sig.address)?,
        Outcome::Mismatch => writeln!(out, "invalid: not signed by {}", auth_sig.address)?,
    }
    Ok(outcome)
}

fn load_account(root: &Path) -> anyhow::Result<Account> {
    let key_file = Config::key_file(root);
    Account::from_key_source(&key_file).context("not initialized, run `init` first")
}
