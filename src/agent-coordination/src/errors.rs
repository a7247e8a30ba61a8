use alloy_primitives::{Address, FixedBytes};

use agent_coordination_types::IntentStatus;

/// Errors raised by the coordination state machine.
///
/// Every variant is a local short-circuit; no state is written before one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinationError {
    Unauthorized { caller: Address },
    NotFound { intent_hash: FixedBytes<32> },
    InvalidState { intent_hash: FixedBytes<32>, status: IntentStatus },
    InvalidSignature { participant: Address },
    NotParticipant { caller: Address },
    AlreadyAccepted { participant: Address },
    ExpiredIntent { expiry: u64, now: u64 },
    NonceTooLow { nonce: u64, current: u64 },
    InvalidParticipants,
    IntentAlreadyExists { intent_hash: FixedBytes<32> },
    ExpiredAcceptance { participant: Address, expiry: u64 },
    PayloadMismatch { expected: FixedBytes<32>, actual: FixedBytes<32> },
    InputTooLarge { len: usize, limit: usize },
}
