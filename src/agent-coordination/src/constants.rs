//! Protocol limits and on-chain encodings.

pub use agent_coordination_types::digest::{
    ACCEPTANCE_TYPE, DOMAIN_NAME, DOMAIN_VERSION, INTENT_TYPE,
};
pub use agent_coordination_types::participants::MAX_PARTICIPANTS;

/// Upper bound on `execute` payload and execution data.
pub const MAX_PAYLOAD_LEN: usize = 1024;

/// Upper bound on a cancellation reason, in characters.
pub const MAX_REASON_LEN: usize = 34;

// EVM `ecrecover` precompile and the gas granted to it per attempt.
pub const ECRECOVER_PRECOMPILE: u8 = 0x01;
pub const ECRECOVER_GAS: u64 = 50_000;
