//! Signature recovery used by `accept`.
//!
//! Acceptances are authenticated by recovering the signer of the acceptance digest and comparing
//! it with the caller. Recovery goes through the EVM `ecrecover` precompile, reached with a static
//! call through the contract's host.

use stylus_sdk::{
    alloy_primitives::{b256, Address, FixedBytes, U256},
    stylus_core::{
        calls::{context::Call, CallAccess},
        Host,
    },
};

use agent_coordination_types::{SignatureVerifier, VerifyError, SIGNATURE_LEN};

use crate::constants::{ECRECOVER_GAS, ECRECOVER_PRECOMPILE};

/// secp256k1 group order / 2. Signatures with a larger `s` are malleable twins and rejected.
const SECP256K1_HALF_ORDER: FixedBytes<32> =
    b256!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// `SignatureVerifier` backed by the `ecrecover` precompile at `0x01`.
pub struct EcrecoverPrecompile<'a> {
    host: &'a dyn Host,
}

impl<'a> EcrecoverPrecompile<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        Self { host }
    }
}

pub fn precompile_address() -> Address {
    Address::with_last_byte(ECRECOVER_PRECOMPILE)
}

/// Normalise the recovery byte to the precompile's 27/28 form; other values are malformed.
pub fn normalise_v(v_raw: u8) -> Result<u8, VerifyError> {
    match v_raw {
        27 | 28 => Ok(v_raw),
        0 | 1 => Ok(v_raw + 27),
        _ => Err(VerifyError::Malformed),
    }
}

/// Rejects zero `r`/`s` and high-`s` signatures before touching the precompile.
pub fn check_components(sig: &[u8; SIGNATURE_LEN]) -> Result<(), VerifyError> {
    let r = U256::from_be_slice(&sig[0..32]);
    let s = U256::from_be_slice(&sig[32..64]);
    if r.is_zero() || s.is_zero() {
        return Err(VerifyError::Malformed);
    }
    if s > U256::from_be_bytes(SECP256K1_HALF_ORDER.0) {
        return Err(VerifyError::Malformed);
    }
    Ok(())
}

impl SignatureVerifier for EcrecoverPrecompile<'_> {
    fn recover(&self, digest: FixedBytes<32>, sig: &[u8; SIGNATURE_LEN]) -> Result<Address, VerifyError> {
        check_components(sig)?;
        let v = normalise_v(sig[64])?;

        let mut input = [0u8; 128];
        input[0..32].copy_from_slice(digest.as_slice());
        // v as 32-byte big-endian word.
        input[63] = v;
        input[64..96].copy_from_slice(&sig[0..32]);
        input[96..128].copy_from_slice(&sig[32..64]);

        let out = self
            .host
            .static_call(&Call::new().gas(ECRECOVER_GAS), precompile_address(), &input)
            .map_err(|_| VerifyError::RecoveryFailed)?;
        // precompile returns 32-byte word with address in the low 20 bytes, or nothing on failure.
        if out.len() >= 32 {
            let recovered = Address::from_slice(&out[12..32]);
            if recovered != Address::ZERO {
                return Ok(recovered);
            }
        }

        Err(VerifyError::RecoveryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylus_sdk::testing::*;

    fn sig_with(v: u8) -> [u8; SIGNATURE_LEN] {
        let mut sig = [0u8; SIGNATURE_LEN];
        sig[0..32].copy_from_slice(&[0x11; 32]);
        sig[32..64].copy_from_slice(&[0x22; 32]);
        sig[64] = v;
        sig
    }

    fn expected_input(digest: FixedBytes<32>, v: u8) -> Vec<u8> {
        let mut input = Vec::with_capacity(128);
        input.extend_from_slice(digest.as_slice());
        input.extend_from_slice(&[0u8; 31]);
        input.push(v);
        input.extend_from_slice(&[0x11; 32]);
        input.extend_from_slice(&[0x22; 32]);
        input
    }

    fn address_word(address: Address) -> Vec<u8> {
        let mut word = vec![0u8; 12];
        word.extend_from_slice(address.as_slice());
        word
    }

    #[test]
    fn recovers_from_precompile_word() {
        let vm = TestVM::default();
        let digest = FixedBytes::repeat_byte(0x33);
        let signer = Address::repeat_byte(0x44);
        vm.mock_static_call(precompile_address(), expected_input(digest, 28), Ok(address_word(signer)));

        let verifier = EcrecoverPrecompile::new(&vm);
        assert_eq!(verifier.recover(digest, &sig_with(28)), Ok(signer));
        // v = 1 is sent to the precompile as 28.
        assert_eq!(verifier.recover(digest, &sig_with(1)), Ok(signer));
    }

    #[test]
    fn empty_zero_or_reverted_output_fails() {
        let vm = TestVM::default();
        let digest = FixedBytes::repeat_byte(0x33);
        let verifier = EcrecoverPrecompile::new(&vm);

        // unmocked call returns no data
        assert_eq!(verifier.recover(digest, &sig_with(27)), Err(VerifyError::RecoveryFailed));

        vm.mock_static_call(precompile_address(), expected_input(digest, 27), Ok(vec![0u8; 32]));
        assert_eq!(verifier.recover(digest, &sig_with(27)), Err(VerifyError::RecoveryFailed));

        vm.mock_static_call(precompile_address(), expected_input(digest, 27), Err(Vec::new()));
        assert_eq!(verifier.recover(digest, &sig_with(27)), Err(VerifyError::RecoveryFailed));
    }

    #[test]
    fn malformed_signatures_never_reach_the_precompile() {
        let vm = TestVM::default();
        let digest = FixedBytes::repeat_byte(0x33);
        vm.mock_static_call(
            precompile_address(),
            expected_input(digest, 27),
            Ok(address_word(Address::repeat_byte(0x44))),
        );
        let verifier = EcrecoverPrecompile::new(&vm);

        assert_eq!(verifier.recover(digest, &sig_with(9)), Err(VerifyError::Malformed));
        let mut high_s = sig_with(27);
        high_s[32..64].copy_from_slice(&[0xff; 32]);
        assert_eq!(verifier.recover(digest, &high_s), Err(VerifyError::Malformed));
        assert_eq!(verifier.recover_bytes(digest, &[0u8; 64]), Err(VerifyError::Malformed));
    }

    #[test]
    fn normalise_v_accepts_both_conventions() {
        assert_eq!(normalise_v(27), Ok(27));
        assert_eq!(normalise_v(28), Ok(28));
        assert_eq!(normalise_v(1), Ok(28));
        assert_eq!(normalise_v(0), Ok(27));
        assert_eq!(normalise_v(9), Err(VerifyError::Malformed));
    }

    #[test]
    fn rejects_zero_and_high_s() {
        let mut sig = [0u8; SIGNATURE_LEN];
        assert_eq!(check_components(&sig), Err(VerifyError::Malformed));

        sig[31] = 1;
        sig[63] = 1;
        assert_eq!(check_components(&sig), Ok(()));

        sig[32..64].copy_from_slice(&[0xff; 32]);
        assert_eq!(check_components(&sig), Err(VerifyError::Malformed));
    }
}
