//! Multi-party agent coordination contract for Arbitrum Stylus.
//!
//! - [`agent_coordination`]: the `#[entrypoint]` contract and its ABI.
//! - [`coordinator`]: propose / accept / execute / cancel / status over any [`store::RecordStore`].
//! - [`store`]: record tables (Stylus storage and in-memory).
//! - [`utils::crypto`]: `ecrecover`-backed signature verification.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod agent_coordination;
pub mod constants;
pub mod coordinator;
pub mod errors;
pub mod interfaces;
pub mod store;
pub mod utils;

pub use agent_coordination::AgentCoordination;
