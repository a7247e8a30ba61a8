#[cfg(test)]
mod tests {
    use crate::signer::{acceptance_digest, address_of, intent_hash, sign_acceptance, LocalVerifier};
    use crate::types::{AcceptanceRequest, IntentRequest};
    use agent_coordination_types::{
        digest::{acceptance_digest as shared_digest, acceptance_struct_hash, domain_separator},
        Domain, SignatureVerifier, VerifyError,
    };
    use alloy_primitives::{Address, FixedBytes, U256};
    use k256::ecdsa::SigningKey;

    fn key(byte: u8) -> SigningKey {
        SigningKey::from_slice(&[byte; 32]).unwrap()
    }

    fn request(participant: Address) -> AcceptanceRequest {
        AcceptanceRequest {
            domain: Domain::new(42161, Address::repeat_byte(0x11)),
            intent_hash: FixedBytes::repeat_byte(0x22),
            participant,
            accept_expiry: 1_900_000_000,
            conditions: FixedBytes::ZERO,
        }
    }

    #[test]
    fn test_digest_matches_shared_engine() {
        let req = request(Address::repeat_byte(0x33));
        let expected = shared_digest(
            domain_separator(42161, Address::repeat_byte(0x11)),
            acceptance_struct_hash(req.intent_hash, req.participant, req.accept_expiry, req.conditions),
        );
        assert_eq!(acceptance_digest(&req), expected);
    }

    #[test]
    fn test_known_address_derivation() {
        // Private key 1 => well-known address.
        let mut one = [0u8; 32];
        one[31] = 1;
        let k = SigningKey::from_slice(&one).unwrap();
        let expected: Address = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".parse().unwrap();
        assert_eq!(address_of(k.verifying_key()), expected);
    }

    #[test]
    fn test_sign_then_recover() {
        let k = key(0x42);
        let participant = address_of(k.verifying_key());
        let req = request(participant);

        let sig = sign_acceptance(&req, &k).unwrap();
        assert!(sig[64] == 27 || sig[64] == 28);

        let recovered = LocalVerifier.recover(acceptance_digest(&req), &sig).unwrap();
        assert_eq!(recovered, participant);
    }

    #[test]
    fn test_signature_bound_to_domain() {
        let k = key(0x42);
        let participant = address_of(k.verifying_key());
        let req = request(participant);
        let sig = sign_acceptance(&req, &k).unwrap();

        let mut other = req.clone();
        other.domain = Domain::new(1, req.domain.verifying_contract);
        let recovered = LocalVerifier.recover(acceptance_digest(&other), &sig);
        assert_ne!(recovered, Ok(participant));
    }

    #[test]
    fn test_rejects_malformed_signatures() {
        let digest = FixedBytes::repeat_byte(1);
        assert_eq!(LocalVerifier.recover_bytes(digest, &[0u8; 64]), Err(VerifyError::Malformed));
        assert_eq!(LocalVerifier.recover(digest, &[0u8; 65]), Err(VerifyError::Malformed));

        let k = key(0x07);
        let req = request(address_of(k.verifying_key()));
        let mut sig = sign_acceptance(&req, &k).unwrap();
        sig[64] = 5;
        assert_eq!(LocalVerifier.recover(acceptance_digest(&req), &sig), Err(VerifyError::Malformed));
    }

    #[test]
    fn test_intent_hash_tracks_fields() {
        let agent = Address::repeat_byte(0x01);
        let req = IntentRequest {
            agent,
            payload_hash: FixedBytes::ZERO,
            expiry: 2_000_000_000,
            nonce: 1,
            coordination_type: FixedBytes::ZERO,
            coordination_value: U256::from(100u64),
            participants: vec![agent],
        };
        let base = intent_hash(&req);
        assert_eq!(base, intent_hash(&req.clone()));

        let mut bumped = req.clone();
        bumped.nonce = 2;
        assert_ne!(intent_hash(&bumped), base);
    }
}
