//! Host-specific helpers for the coordination contract.

pub mod crypto;
