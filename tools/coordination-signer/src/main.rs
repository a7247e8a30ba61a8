use std::fs;

use alloy_primitives::{Address, FixedBytes, U256};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use k256::ecdsa::SigningKey;
use serde::Serialize;

use agent_coordination_types::{
    canonicalize,
    digest::{acceptance_type_hash, intent_type_hash, participants_hash, DOMAIN_NAME, DOMAIN_VERSION},
    is_canonical, Domain, SignatureVerifier,
};
use coordination_signer::{
    acceptance_digest, address_of, intent_hash, sign_acceptance,
    signer::acceptance_struct_hash,
    types::{DomainConstantsOutput, IntentHashOutput, SignedAcceptanceOutput, VerifyOutput},
    AcceptanceRequest, IntentRequest, LocalVerifier,
};

/// Build digests and sign acceptances for the agent coordination contract.
///
/// Every subcommand prints a single JSON object on stdout.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Domain name/version, type hashes and the domain separator for a deployment.
    Constants(DomainArgs),
    /// Sort and dedupe a participant list into canonical order.
    Canonicalize {
        #[arg(required = true)]
        participants: Vec<Address>,
    },
    /// Compute the intent hash `propose` will return.
    IntentHash(IntentArgs),
    /// Sign an acceptance for an intent.
    SignAcceptance(SignArgs),
    /// Recover the signer of an acceptance signature.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct DomainArgs {
    #[arg(long, env = "CHAIN_ID")]
    chain_id: u64,

    /// Deployed coordination contract.
    #[arg(long, env = "VERIFYING_CONTRACT")]
    verifying_contract: Address,
}

impl DomainArgs {
    fn domain(&self) -> Domain {
        Domain::new(self.chain_id, self.verifying_contract)
    }
}

#[derive(Args, Debug)]
struct IntentArgs {
    #[arg(long)]
    agent: Address,
    #[arg(long)]
    payload_hash: FixedBytes<32>,
    #[arg(long)]
    expiry: u64,
    #[arg(long)]
    nonce: u64,
    #[arg(long, default_value_t = FixedBytes::ZERO)]
    coordination_type: FixedBytes<32>,
    #[arg(long, default_value_t = U256::ZERO)]
    coordination_value: U256,
    /// Comma-separated; must already be canonical unless `--canonicalize` is set.
    #[arg(long, value_delimiter = ',', required = true)]
    participants: Vec<Address>,
    #[arg(long)]
    canonicalize: bool,
}

#[derive(Args, Debug)]
struct AcceptanceArgs {
    #[command(flatten)]
    domain: DomainArgs,
    #[arg(long)]
    intent_hash: FixedBytes<32>,
    #[arg(long)]
    accept_expiry: u64,
    #[arg(long, default_value_t = FixedBytes::ZERO)]
    conditions: FixedBytes<32>,
}

#[derive(Args, Debug)]
struct SignArgs {
    #[command(flatten)]
    acceptance: AcceptanceArgs,

    /// Path to a file containing the participant private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[command(flatten)]
    acceptance: AcceptanceArgs,
    #[arg(long)]
    participant: Address,
    /// 65-byte `r || s || v` signature (hex).
    #[arg(long)]
    signature: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Constants(args) => print_json(&constants(&args)),
        Command::Canonicalize { participants } => {
            let sorted = canonicalize(&participants).map_err(|e| anyhow!("invalid participant list: {e:?}"))?;
            print_json(&sorted)
        }
        Command::IntentHash(args) => print_json(&intent(args)?),
        Command::SignAcceptance(args) => print_json(&sign(args)?),
        Command::Verify(args) => print_json(&verify(args)?),
    }
}

fn constants(args: &DomainArgs) -> DomainConstantsOutput {
    DomainConstantsOutput {
        name: DOMAIN_NAME,
        version: DOMAIN_VERSION,
        chain_id: args.chain_id,
        verifying_contract: args.verifying_contract,
        domain_separator: args.domain().separator(),
        intent_type_hash: intent_type_hash(),
        acceptance_type_hash: acceptance_type_hash(),
    }
}

fn intent(args: IntentArgs) -> Result<IntentHashOutput> {
    let participants = if args.canonicalize {
        canonicalize(&args.participants).map_err(|e| anyhow!("invalid participant list: {e:?}"))?
    } else {
        args.participants
    };
    if !is_canonical(&participants) {
        return Err(anyhow!("participants are not in canonical order (pass --canonicalize)"));
    }
    let request = IntentRequest {
        agent: args.agent,
        payload_hash: args.payload_hash,
        expiry: args.expiry,
        nonce: args.nonce,
        coordination_type: args.coordination_type,
        coordination_value: args.coordination_value,
        participants,
    };
    Ok(IntentHashOutput {
        intent_hash: intent_hash(&request),
        participants_hash: participants_hash(&request.participants),
        participants: request.participants,
    })
}

fn acceptance_request(args: &AcceptanceArgs, participant: Address) -> AcceptanceRequest {
    AcceptanceRequest {
        domain: args.domain.domain(),
        intent_hash: args.intent_hash,
        participant,
        accept_expiry: args.accept_expiry,
        conditions: args.conditions,
    }
}

fn sign(args: SignArgs) -> Result<SignedAcceptanceOutput> {
    let key = load_signing_key(args.private_key_path.as_deref(), args.private_key.as_deref())?;
    let participant = address_of(key.verifying_key());
    let request = acceptance_request(&args.acceptance, participant);
    let signature = sign_acceptance(&request, &key).context("failed signing acceptance digest")?;

    Ok(SignedAcceptanceOutput {
        participant,
        acceptance_hash: acceptance_struct_hash(&request),
        digest: acceptance_digest(&request),
        signature: format!("0x{}", hex::encode(signature)),
    })
}

fn verify(args: VerifyArgs) -> Result<VerifyOutput> {
    let request = acceptance_request(&args.acceptance, args.participant);
    let digest = acceptance_digest(&request);
    let signature = decode_hex(&args.signature).context("failed decoding --signature")?;
    let recovered = LocalVerifier.recover_bytes(digest, &signature).ok();

    Ok(VerifyOutput {
        digest,
        recovered,
        valid: recovered == Some(args.participant),
    })
}

fn load_signing_key(path: Option<&str>, inline: Option<&str>) -> Result<SigningKey> {
    let raw = match (path, inline) {
        (Some(path), _) => fs::read_to_string(path).with_context(|| format!("failed reading {path}"))?,
        (None, Some(key)) => key.to_string(),
        (None, None) => {
            return Err(anyhow!(
                "missing signer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
            ))
        }
    };
    let bytes = decode_hex(raw.trim()).context("private key is not valid hex")?;
    SigningKey::from_slice(&bytes).map_err(|_| anyhow!("private key is not a valid secp256k1 scalar"))
}

fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(stripped)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed serialising output")?;
    println!("{out}");
    Ok(())
}
