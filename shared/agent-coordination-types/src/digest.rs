//! Domain-separated digests for intents and acceptances.
//!
//! Off-chain signers must reproduce these bytes exactly. Word encodings:
//! - `u64` / `U256`: 32-byte big-endian, zero-left-padded.
//! - identity: 20 address bytes, zero-right-padded to 32.
//!
//! The intent hash used as the storage key is the intent *struct* hash itself (no domain wrapping),
//! so clients can derive it before submitting anything.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, FixedBytes, U256};

use crate::participants::canonical_bytes;

pub const DOMAIN_NAME: &str = "AgentCoordination";
pub const DOMAIN_VERSION: &str = "1";

pub const INTENT_TYPE: &str = "AgentIntent(bytes32 payloadHash,uint64 expiry,uint64 nonce,address agentId,bytes32 coordinationType,uint256 coordinationValue,address[] participants)";
pub const ACCEPTANCE_TYPE: &str =
    "AcceptanceAttestation(bytes32 intentHash,address participant,uint64 nonce,uint64 expiry,bytes32 conditionsHash)";

/// Prefix of the signed acceptance digest.
pub const DIGEST_PREFIX: &[u8; 2] = b"\x19\x01";

/// Acceptance nonce is fixed; replay is bounded by (intent, participant) uniqueness instead.
pub const ACCEPTANCE_NONCE: u64 = 0;

/// Network + deployment the digests are bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Domain {
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self { chain_id, verifying_contract }
    }

    pub fn separator(&self) -> FixedBytes<32> {
        domain_separator(self.chain_id, self.verifying_contract)
    }
}

/// Borrowed view over the fields that make up an intent hash.
#[derive(Clone, Copy, Debug)]
pub struct IntentFields<'a> {
    pub payload_hash: FixedBytes<32>,
    pub expiry: u64,
    pub nonce: u64,
    pub agent: Address,
    pub coordination_type: FixedBytes<32>,
    pub coordination_value: U256,
    pub participants: &'a [Address],
}

pub fn intent_type_hash() -> FixedBytes<32> {
    keccak256(INTENT_TYPE.as_bytes())
}

pub fn acceptance_type_hash() -> FixedBytes<32> {
    keccak256(ACCEPTANCE_TYPE.as_bytes())
}

pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..32].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn identity_word(id: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[0..20].copy_from_slice(id.as_slice());
    word
}

/// `H(addr_0 || addr_1 || ...)` in list order.
pub fn participants_hash(participants: &[Address]) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(20 * participants.len());
    for p in participants {
        buf.extend_from_slice(p.as_slice());
    }
    keccak256(buf)
}

/// Hash of the verifying deployment's canonical identity.
pub fn verifying_context_hash(verifying_contract: Address) -> FixedBytes<32> {
    keccak256(canonical_bytes(&verifying_contract))
}

pub fn domain_separator(chain_id: u64, verifying_contract: Address) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * 4);
    buf.extend_from_slice(keccak256(DOMAIN_NAME.as_bytes()).as_slice());
    buf.extend_from_slice(keccak256(DOMAIN_VERSION.as_bytes()).as_slice());
    buf.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    buf.extend_from_slice(verifying_context_hash(verifying_contract).as_slice());
    keccak256(buf)
}

pub fn intent_struct_hash(fields: &IntentFields<'_>) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * 8);
    buf.extend_from_slice(intent_type_hash().as_slice());
    buf.extend_from_slice(fields.payload_hash.as_slice());
    buf.extend_from_slice(&u64_word(fields.expiry));
    buf.extend_from_slice(&u64_word(fields.nonce));
    buf.extend_from_slice(&identity_word(&fields.agent));
    buf.extend_from_slice(fields.coordination_type.as_slice());
    buf.extend_from_slice(&fields.coordination_value.to_be_bytes::<32>());
    buf.extend_from_slice(participants_hash(fields.participants).as_slice());
    keccak256(buf)
}

pub fn acceptance_struct_hash(
    intent_hash: FixedBytes<32>,
    participant: Address,
    accept_expiry: u64,
    conditions: FixedBytes<32>,
) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * 6);
    buf.extend_from_slice(acceptance_type_hash().as_slice());
    buf.extend_from_slice(intent_hash.as_slice());
    buf.extend_from_slice(&identity_word(&participant));
    buf.extend_from_slice(&u64_word(ACCEPTANCE_NONCE));
    buf.extend_from_slice(&u64_word(accept_expiry));
    buf.extend_from_slice(conditions.as_slice());
    keccak256(buf)
}

/// The digest a participant signs: `H("\x19\x01" || domainSeparator || acceptanceStructHash)`.
pub fn acceptance_digest(domain_separator: FixedBytes<32>, struct_hash: FixedBytes<32>) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(DIGEST_PREFIX);
    buf.extend_from_slice(domain_separator.as_slice());
    buf.extend_from_slice(struct_hash.as_slice());
    keccak256(buf)
}
