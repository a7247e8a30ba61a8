//! Host-agnostic building blocks shared by the coordination contract and off-chain tooling.
//!
//! Everything here must produce identical bytes on-chain (Stylus / WASM) and off-chain, so the
//! crate is `no_std` and only depends on `alloy-primitives`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod digest;
pub mod participants;
pub mod status;
pub mod verifier;

pub use digest::{
    acceptance_digest, acceptance_struct_hash, domain_separator, intent_struct_hash, participants_hash,
    Domain, IntentFields,
};
pub use participants::{canonicalize, contains, is_canonical, validate_participants, ParticipantsError, MAX_PARTICIPANTS};
pub use status::IntentStatus;
pub use verifier::{SignatureVerifier, VerifyError, SIGNATURE_LEN};
