//! Stylus storage layout for intent and acceptance records.
//!
//! `status == 0` (`IntentStatus::None`) marks an empty slot; acceptances carry an explicit flag
//! because a zero expiry is representable.

use alloc::{vec, vec::Vec};

use stylus_sdk::{
    alloy_primitives::{U64, U8},
    prelude::*,
};

use agent_coordination_types::IntentStatus;

use super::{AcceptanceRecord, IntentRecord};

sol_storage! {
    pub struct StoredIntent {
        uint8 status;
        uint8 accept_count;
        address agent;
        bytes32 payload_hash;
        uint64 expiry;
        uint64 nonce;
        bytes32 coordination_type;
        uint256 coordination_value;
        address[] participants;
    }

    pub struct StoredAcceptance {
        bool accepted;
        uint64 expiry;
        bytes32 conditions;
    }
}

impl StoredIntent {
    pub fn status(&self) -> IntentStatus {
        IntentStatus::try_from(self.status.get().to::<u8>()).unwrap_or_default()
    }

    pub fn exists(&self) -> bool {
        self.status() != IntentStatus::None
    }

    pub fn read_record(&self) -> Option<IntentRecord> {
        if !self.exists() {
            return None;
        }
        let mut participants = Vec::with_capacity(self.participants.len());
        for i in 0..self.participants.len() {
            if let Some(p) = self.participants.get(i) {
                participants.push(p);
            }
        }
        Some(IntentRecord {
            agent: self.agent.get(),
            payload_hash: self.payload_hash.get(),
            expiry: self.expiry.get().to::<u64>(),
            nonce: self.nonce.get().to::<u64>(),
            coordination_type: self.coordination_type.get(),
            coordination_value: self.coordination_value.get(),
            participants,
            status: self.status(),
            accept_count: self.accept_count.get().to::<u8>(),
        })
    }

    /// Write a fresh record; the slot must be empty (participants are appended).
    pub fn write_record(&mut self, record: &IntentRecord) {
        self.agent.set(record.agent);
        self.payload_hash.set(record.payload_hash);
        self.expiry.set(U64::from(record.expiry));
        self.nonce.set(U64::from(record.nonce));
        self.coordination_type.set(record.coordination_type);
        self.coordination_value.set(record.coordination_value);
        for p in &record.participants {
            self.participants.push(*p);
        }
        self.set_progress(record.status, record.accept_count);
    }

    pub fn set_progress(&mut self, status: IntentStatus, accept_count: u8) {
        self.status.set(U8::from(u8::from(status)));
        self.accept_count.set(U8::from(accept_count));
    }
}

impl StoredAcceptance {
    pub fn read_record(&self) -> Option<AcceptanceRecord> {
        if !self.accepted.get() {
            return None;
        }
        Some(AcceptanceRecord {
            expiry: self.expiry.get().to::<u64>(),
            conditions: self.conditions.get(),
        })
    }

    pub fn write_record(&mut self, record: &AcceptanceRecord) {
        self.accepted.set(true);
        self.expiry.set(U64::from(record.expiry));
        self.conditions.set(record.conditions);
    }
}
