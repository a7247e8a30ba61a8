use alloc::collections::BTreeMap;

use alloy_primitives::{Address, FixedBytes};

use agent_coordination_types::IntentStatus;

use super::{AcceptanceRecord, IntentRecord, RecordStore};

/// In-memory record tables, used for off-chain simulation and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    intents: BTreeMap<FixedBytes<32>, IntentRecord>,
    nonces: BTreeMap<Address, u64>,
    acceptances: BTreeMap<(FixedBytes<32>, Address), AcceptanceRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }
}

impl RecordStore for MemoryStore {
    fn intent(&self, intent_hash: FixedBytes<32>) -> Option<IntentRecord> {
        self.intents.get(&intent_hash).cloned()
    }

    fn intent_exists(&self, intent_hash: FixedBytes<32>) -> bool {
        self.intents.contains_key(&intent_hash)
    }

    fn insert_intent(&mut self, intent_hash: FixedBytes<32>, record: &IntentRecord) {
        self.intents.entry(intent_hash).or_insert_with(|| record.clone());
    }

    fn update_intent(&mut self, intent_hash: FixedBytes<32>, status: IntentStatus, accept_count: u8) {
        if let Some(record) = self.intents.get_mut(&intent_hash) {
            record.status = status;
            record.accept_count = accept_count;
        }
    }

    fn agent_nonce(&self, agent: Address) -> u64 {
        self.nonces.get(&agent).copied().unwrap_or(0)
    }

    fn set_agent_nonce(&mut self, agent: Address, nonce: u64) {
        self.nonces.insert(agent, nonce);
    }

    fn acceptance(&self, intent_hash: FixedBytes<32>, participant: Address) -> Option<AcceptanceRecord> {
        self.acceptances.get(&(intent_hash, participant)).copied()
    }

    fn insert_acceptance(&mut self, intent_hash: FixedBytes<32>, participant: Address, record: &AcceptanceRecord) {
        self.acceptances.entry((intent_hash, participant)).or_insert(*record);
    }
}
