use alloy_primitives::{Address, FixedBytes};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

use agent_coordination_types::{
    digest::{self, IntentFields},
    SignatureVerifier, VerifyError, SIGNATURE_LEN,
};

use crate::types::{AcceptanceRequest, IntentRequest};

fn keccak256_bytes(bytes: &[u8]) -> FixedBytes<32> {
    let mut h = Keccak256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut b = [0u8; 32];
    b.copy_from_slice(out.as_slice());
    FixedBytes(b)
}

/// The intent hash `propose` will return for this request (must match on-chain).
pub fn intent_hash(request: &IntentRequest) -> FixedBytes<32> {
    digest::intent_struct_hash(&IntentFields {
        payload_hash: request.payload_hash,
        expiry: request.expiry,
        nonce: request.nonce,
        agent: request.agent,
        coordination_type: request.coordination_type,
        coordination_value: request.coordination_value,
        participants: &request.participants,
    })
}

pub fn acceptance_struct_hash(request: &AcceptanceRequest) -> FixedBytes<32> {
    digest::acceptance_struct_hash(
        request.intent_hash,
        request.participant,
        request.accept_expiry,
        request.conditions,
    )
}

/// The digest `accept` verifies (must match on-chain).
pub fn acceptance_digest(request: &AcceptanceRequest) -> FixedBytes<32> {
    digest::acceptance_digest(request.domain.separator(), acceptance_struct_hash(request))
}

/// Ethereum address of a secp256k1 public key.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256_bytes(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..32])
}

/// Sign the acceptance digest; returns `r || s || v` with low `s` and `v ∈ {27, 28}`.
pub fn sign_acceptance(
    request: &AcceptanceRequest,
    signing_key: &SigningKey,
) -> Result<[u8; SIGNATURE_LEN], k256::ecdsa::Error> {
    let digest = acceptance_digest(request);
    let (signature, recovery_id) = signing_key.sign_prehash_recoverable(digest.as_slice())?;

    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(signature.to_bytes().as_slice());
    out[64] = 27 + recovery_id.to_byte();
    Ok(out)
}

/// k256-backed recovery with the same acceptance rules as the on-chain precompile path.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalVerifier;

impl SignatureVerifier for LocalVerifier {
    fn recover(&self, digest: FixedBytes<32>, sig: &[u8; SIGNATURE_LEN]) -> Result<Address, VerifyError> {
        let signature = Signature::from_slice(&sig[..64]).map_err(|_| VerifyError::Malformed)?;
        if signature.normalize_s().is_some() {
            // high-s
            return Err(VerifyError::Malformed);
        }
        let v = match sig[64] {
            27 | 28 => sig[64] - 27,
            0 | 1 => sig[64],
            _ => return Err(VerifyError::Malformed),
        };
        let recovery_id = RecoveryId::from_byte(v).ok_or(VerifyError::Malformed)?;
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
            .map_err(|_| VerifyError::RecoveryFailed)?;
        Ok(address_of(&key))
    }
}
