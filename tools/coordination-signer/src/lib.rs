//! Off-chain counterpart of the coordination contract's digest engine.
//!
//! Builds intent hashes and acceptance digests with the shared types crate, signs acceptances with
//! k256 and recovers signers locally, so tooling can check a signature before submitting it.

pub mod signer;
pub mod types;

mod tests;

pub use signer::{acceptance_digest, address_of, intent_hash, sign_acceptance, LocalVerifier};
pub use types::{AcceptanceRequest, IntentRequest};
