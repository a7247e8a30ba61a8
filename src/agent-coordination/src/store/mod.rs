//! Keyed record tables behind one trait: intents, per-agent nonces, per-(intent, participant)
//! acceptances.
//!
//! The contract implements [`RecordStore`] over its Stylus storage; [`memory::MemoryStore`] backs
//! off-chain simulation and tests. Writes are whole-record or single-field; callers validate first.

pub mod memory;
pub mod onchain;

use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

use agent_coordination_types::{digest::IntentFields, IntentStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentRecord {
    pub agent: Address,
    pub payload_hash: FixedBytes<32>,
    pub expiry: u64,
    pub nonce: u64,
    pub coordination_type: FixedBytes<32>,
    pub coordination_value: U256,
    pub participants: Vec<Address>,
    pub status: IntentStatus,
    pub accept_count: u8,
}

impl IntentRecord {
    pub fn fields(&self) -> IntentFields<'_> {
        IntentFields {
            payload_hash: self.payload_hash,
            expiry: self.expiry,
            nonce: self.nonce,
            agent: self.agent,
            coordination_type: self.coordination_type,
            coordination_value: self.coordination_value,
            participants: &self.participants,
        }
    }

    pub fn required_acceptances(&self) -> u8 {
        self.participants.len() as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptanceRecord {
    pub expiry: u64,
    pub conditions: FixedBytes<32>,
}

pub trait RecordStore {
    fn intent(&self, intent_hash: FixedBytes<32>) -> Option<IntentRecord>;

    fn intent_exists(&self, intent_hash: FixedBytes<32>) -> bool {
        self.intent(intent_hash).is_some()
    }

    /// Persist a new intent. Only called for hashes with no existing record.
    fn insert_intent(&mut self, intent_hash: FixedBytes<32>, record: &IntentRecord);

    /// Single read-modify-write of the mutable part of an intent.
    fn update_intent(&mut self, intent_hash: FixedBytes<32>, status: IntentStatus, accept_count: u8);

    /// Last nonce used by `agent`; 0 if never seen.
    fn agent_nonce(&self, agent: Address) -> u64;

    fn set_agent_nonce(&mut self, agent: Address, nonce: u64);

    fn acceptance(&self, intent_hash: FixedBytes<32>, participant: Address) -> Option<AcceptanceRecord>;

    /// Persist an acceptance. Only called once per (intent, participant).
    fn insert_acceptance(&mut self, intent_hash: FixedBytes<32>, participant: Address, record: &AcceptanceRecord);
}
