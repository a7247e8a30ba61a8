use alloy_primitives::{Address, FixedBytes, U256};
use serde::Serialize;

use agent_coordination_types::Domain;

/// Fields of an intent as submitted to `propose`; `agent` is the proposing caller.
#[derive(Clone, Debug)]
pub struct IntentRequest {
    pub agent: Address,
    pub payload_hash: FixedBytes<32>,
    pub expiry: u64,
    pub nonce: u64,
    pub coordination_type: FixedBytes<32>,
    pub coordination_value: U256,
    /// Must already be canonical; see `agent_coordination_types::canonicalize`.
    pub participants: Vec<Address>,
}

/// Everything a participant signs when accepting an intent.
#[derive(Clone, Debug)]
pub struct AcceptanceRequest {
    /// Domain separation parameters (network + deployment).
    pub domain: Domain,
    pub intent_hash: FixedBytes<32>,
    pub participant: Address,
    pub accept_expiry: u64,
    pub conditions: FixedBytes<32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConstantsOutput {
    pub name: &'static str,
    pub version: &'static str,
    pub chain_id: u64,
    pub verifying_contract: Address,
    pub domain_separator: FixedBytes<32>,
    pub intent_type_hash: FixedBytes<32>,
    pub acceptance_type_hash: FixedBytes<32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentHashOutput {
    pub intent_hash: FixedBytes<32>,
    pub participants_hash: FixedBytes<32>,
    pub participants: Vec<Address>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAcceptanceOutput {
    pub participant: Address,
    pub acceptance_hash: FixedBytes<32>,
    pub digest: FixedBytes<32>,
    pub signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOutput {
    pub digest: FixedBytes<32>,
    pub recovered: Option<Address>,
    pub valid: bool,
}
