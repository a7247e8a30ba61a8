use alloy_primitives::{Address, FixedBytes};

/// `r || s || v`.
pub const SIGNATURE_LEN: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// Signature bytes have the wrong length or an out-of-range component.
    Malformed,
    /// No signer could be recovered for the digest.
    RecoveryFailed,
}

/// Recovers the signer identity of a digest.
///
/// Implemented on-chain via the `ecrecover` precompile and off-chain via k256, so the state
/// machine never depends on a particular signature backend.
pub trait SignatureVerifier {
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8; SIGNATURE_LEN]) -> Result<Address, VerifyError>;

    /// Parse raw bytes and recover; anything but exactly 65 bytes is malformed.
    fn recover_bytes(&self, digest: FixedBytes<32>, signature: &[u8]) -> Result<Address, VerifyError> {
        let sig: &[u8; SIGNATURE_LEN] = signature.try_into().map_err(|_| VerifyError::Malformed)?;
        self.recover(digest, sig)
    }
}
