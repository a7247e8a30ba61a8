//! Participant-list canonicalisation.
//!
//! A participant list is canonical when it is strictly ascending over the fixed-width identity
//! encoding (`IDENTITY_TAG || address`). Strict ordering rejects duplicates as well, so no separate
//! uniqueness pass exists. Lists are capped at [`MAX_PARTICIPANTS`] so every check here is bounded.

use alloc::vec::Vec;

use alloy_primitives::Address;

/// Hard cap on participants per intent.
pub const MAX_PARTICIPANTS: usize = 20;

/// Tag byte prefixed to an address in its canonical encoding.
pub const IDENTITY_TAG: u8 = 0x01;

/// Width of the canonical identity encoding.
pub const IDENTITY_LEN: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantsError {
    Empty,
    TooMany { len: usize },
    NotCanonical { index: usize },
    MissingAgent,
}

/// Canonical fixed-width encoding of an identity.
pub fn canonical_bytes(id: &Address) -> [u8; IDENTITY_LEN] {
    let mut out = [0u8; IDENTITY_LEN];
    out[0] = IDENTITY_TAG;
    out[1..].copy_from_slice(id.as_slice());
    out
}

/// Strict byte-wise less-than over the canonical encoding; equal encodings are not less.
fn strictly_less(a: &Address, b: &Address) -> bool {
    let (a, b) = (canonical_bytes(a), canonical_bytes(b));
    for i in 0..IDENTITY_LEN {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    false
}

pub fn is_canonical(list: &[Address]) -> bool {
    if list.len() > MAX_PARTICIPANTS {
        return false;
    }
    if list.len() < 2 {
        return true;
    }
    for i in 1..list.len() {
        if !strictly_less(&list[i - 1], &list[i]) {
            return false;
        }
    }
    true
}

pub fn contains(list: &[Address], id: &Address) -> bool {
    for candidate in list {
        if candidate == id {
            return true;
        }
    }
    false
}

/// Propose-time checks: non-empty, bounded, canonical, and includes the agent.
pub fn validate_participants(list: &[Address], agent: &Address) -> Result<(), ParticipantsError> {
    if list.is_empty() {
        return Err(ParticipantsError::Empty);
    }
    if list.len() > MAX_PARTICIPANTS {
        return Err(ParticipantsError::TooMany { len: list.len() });
    }
    for i in 1..list.len() {
        if !strictly_less(&list[i - 1], &list[i]) {
            return Err(ParticipantsError::NotCanonical { index: i });
        }
    }
    if !contains(list, agent) {
        return Err(ParticipantsError::MissingAgent);
    }
    Ok(())
}

/// Sort and dedupe an arbitrary list into canonical order (for list builders off-chain).
pub fn canonicalize(list: &[Address]) -> Result<Vec<Address>, ParticipantsError> {
    let mut out: Vec<Address> = list.to_vec();
    out.sort_by(|a, b| canonical_bytes(a).cmp(&canonical_bytes(b)));
    out.dedup();
    if out.is_empty() {
        return Err(ParticipantsError::Empty);
    }
    if out.len() > MAX_PARTICIPANTS {
        return Err(ParticipantsError::TooMany { len: out.len() });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address::from(bytes)
    }

    #[test]
    fn short_lists_are_trivially_canonical() {
        assert!(is_canonical(&[]));
        assert!(is_canonical(&[addr(7)]));
    }

    #[test]
    fn ordering_and_uniqueness_share_one_check() {
        assert!(is_canonical(&[addr(1), addr(2), addr(9)]));
        assert!(!is_canonical(&[addr(2), addr(1)]));
        assert!(!is_canonical(&[addr(1), addr(1)]));
        assert!(!is_canonical(&[addr(1), addr(3), addr(3)]));
    }

    #[test]
    fn first_differing_byte_decides() {
        let mut hi = [0u8; 20];
        hi[0] = 0x01;
        let mut lo = [0xffu8; 20];
        lo[0] = 0x00;
        assert!(is_canonical(&[Address::from(lo), Address::from(hi)]));
        assert!(!is_canonical(&[Address::from(hi), Address::from(lo)]));
    }

    #[test]
    fn cap_is_enforced() {
        let twenty: Vec<Address> = (1..=20).map(addr).collect();
        let twenty_one: Vec<Address> = (1..=21).map(addr).collect();
        assert!(is_canonical(&twenty));
        assert!(!is_canonical(&twenty_one));
        assert_eq!(
            validate_participants(&twenty_one, &addr(1)),
            Err(ParticipantsError::TooMany { len: 21 })
        );
    }

    #[test]
    fn validate_requires_agent() {
        let list = [addr(1), addr(2)];
        assert_eq!(validate_participants(&list, &addr(2)), Ok(()));
        assert_eq!(validate_participants(&list, &addr(3)), Err(ParticipantsError::MissingAgent));
        assert_eq!(validate_participants(&[], &addr(3)), Err(ParticipantsError::Empty));
        assert_eq!(
            validate_participants(&[addr(2), addr(1)], &addr(1)),
            Err(ParticipantsError::NotCanonical { index: 1 })
        );
    }

    #[test]
    fn canonicalize_sorts_and_dedupes() {
        let out = canonicalize(&[addr(5), addr(1), addr(5), addr(3)]).unwrap();
        assert_eq!(out, vec![addr(1), addr(3), addr(5)]);
        assert!(is_canonical(&out));
        assert_eq!(canonicalize(&[]), Err(ParticipantsError::Empty));
    }

    #[test]
    fn contains_is_exact() {
        let list = [addr(1), addr(2)];
        assert!(contains(&list, &addr(2)));
        assert!(!contains(&list, &addr(4)));
    }
}
