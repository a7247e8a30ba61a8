//! Coordination state machine: propose → accept* → execute, or cancel.
//!
//! Each operation validates everything before its first write, so a failed call leaves the store
//! untouched even outside a reverting transaction. `Expired` is never written; it is derived from
//! `now > expiry` when a record is read.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, FixedBytes, U256};

use agent_coordination_types::{
    digest::{acceptance_digest, acceptance_struct_hash, intent_struct_hash, Domain, IntentFields},
    participants::{contains, validate_participants},
    IntentStatus, SignatureVerifier,
};

use crate::{
    constants::{MAX_PAYLOAD_LEN, MAX_REASON_LEN},
    errors::CoordinationError,
    store::{AcceptanceRecord, IntentRecord, RecordStore},
};

/// Who is calling, when, and which deployment the call is bound to.
#[derive(Clone, Copy, Debug)]
pub struct CallContext {
    pub caller: Address,
    pub now: u64,
    pub domain: Domain,
}

#[derive(Clone, Debug)]
pub struct ProposeParams {
    pub payload_hash: FixedBytes<32>,
    pub expiry: u64,
    pub nonce: u64,
    pub coordination_type: FixedBytes<32>,
    pub coordination_value: U256,
    pub participants: Vec<Address>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proposed {
    pub intent_hash: FixedBytes<32>,
    pub participant_count: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub acceptance_hash: FixedBytes<32>,
    pub accepted_count: u8,
    pub required_count: u8,
}

impl Accepted {
    pub fn fully_accepted(&self) -> bool {
        self.accepted_count == self.required_count
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Executed {
    pub success: bool,
    pub result: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub status: IntentStatus,
    pub agent: Address,
    pub participants: Vec<Address>,
    pub accepted_by: Vec<Address>,
    pub expiry: u64,
}

pub fn propose<S: RecordStore>(
    store: &mut S,
    ctx: &CallContext,
    params: ProposeParams,
) -> Result<Proposed, CoordinationError> {
    let agent = ctx.caller;

    if params.expiry <= ctx.now {
        return Err(CoordinationError::ExpiredIntent { expiry: params.expiry, now: ctx.now });
    }
    let current = store.agent_nonce(agent);
    if params.nonce <= current {
        return Err(CoordinationError::NonceTooLow { nonce: params.nonce, current });
    }
    validate_participants(&params.participants, &agent).map_err(|_| CoordinationError::InvalidParticipants)?;

    let intent_hash = intent_struct_hash(&IntentFields {
        payload_hash: params.payload_hash,
        expiry: params.expiry,
        nonce: params.nonce,
        agent,
        coordination_type: params.coordination_type,
        coordination_value: params.coordination_value,
        participants: &params.participants,
    });
    if store.intent_exists(intent_hash) {
        return Err(CoordinationError::IntentAlreadyExists { intent_hash });
    }

    let participant_count = params.participants.len() as u8;
    let record = IntentRecord {
        agent,
        payload_hash: params.payload_hash,
        expiry: params.expiry,
        nonce: params.nonce,
        coordination_type: params.coordination_type,
        coordination_value: params.coordination_value,
        participants: params.participants,
        status: IntentStatus::Proposed,
        accept_count: 0,
    };
    store.insert_intent(intent_hash, &record);
    store.set_agent_nonce(agent, params.nonce);

    Ok(Proposed { intent_hash, participant_count })
}

/// An acceptance that passed every check and is ready to be recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckedAcceptance {
    pub intent_hash: FixedBytes<32>,
    pub participant: Address,
    pub acceptance_hash: FixedBytes<32>,
    pub record: AcceptanceRecord,
    accept_count: u8,
    required_count: u8,
}

pub fn accept<S: RecordStore, V: SignatureVerifier>(
    store: &mut S,
    verifier: &V,
    ctx: &CallContext,
    intent_hash: FixedBytes<32>,
    accept_expiry: u64,
    conditions: FixedBytes<32>,
    signature: &[u8],
) -> Result<Accepted, CoordinationError> {
    let checked = check_acceptance(store, verifier, ctx, intent_hash, accept_expiry, conditions, signature)?;
    Ok(record_acceptance(store, checked))
}

/// Read-only half of `accept`: every check, including signature recovery.
pub fn check_acceptance<S: RecordStore, V: SignatureVerifier>(
    store: &S,
    verifier: &V,
    ctx: &CallContext,
    intent_hash: FixedBytes<32>,
    accept_expiry: u64,
    conditions: FixedBytes<32>,
    signature: &[u8],
) -> Result<CheckedAcceptance, CoordinationError> {
    let participant = ctx.caller;
    let intent = load(store, intent_hash)?;

    if ctx.now >= intent.expiry {
        return Err(CoordinationError::ExpiredIntent { expiry: intent.expiry, now: ctx.now });
    }
    if intent.status != IntentStatus::Proposed {
        return Err(CoordinationError::InvalidState { intent_hash, status: intent.status });
    }
    if !contains(&intent.participants, &participant) {
        return Err(CoordinationError::NotParticipant { caller: participant });
    }
    if store.acceptance(intent_hash, participant).is_some() {
        return Err(CoordinationError::AlreadyAccepted { participant });
    }
    if accept_expiry <= ctx.now {
        return Err(CoordinationError::ExpiredAcceptance { participant, expiry: accept_expiry });
    }

    let acceptance_hash = acceptance_struct_hash(intent_hash, participant, accept_expiry, conditions);
    let digest = acceptance_digest(ctx.domain.separator(), acceptance_hash);
    let signer = verifier
        .recover_bytes(digest, signature)
        .map_err(|_| CoordinationError::InvalidSignature { participant })?;
    if signer != participant {
        return Err(CoordinationError::InvalidSignature { participant });
    }

    Ok(CheckedAcceptance {
        intent_hash,
        participant,
        acceptance_hash,
        record: AcceptanceRecord { expiry: accept_expiry, conditions },
        accept_count: intent.accept_count,
        required_count: intent.required_acceptances(),
    })
}

/// Write half of `accept`. Moves the intent to `Ready` once the last acceptance lands.
pub fn record_acceptance<S: RecordStore>(store: &mut S, checked: CheckedAcceptance) -> Accepted {
    store.insert_acceptance(checked.intent_hash, checked.participant, &checked.record);

    let required_count = checked.required_count;
    let accepted_count = checked.accept_count.saturating_add(1).min(required_count);
    let status = if accepted_count == required_count { IntentStatus::Ready } else { IntentStatus::Proposed };
    store.update_intent(checked.intent_hash, status, accepted_count);

    Accepted { acceptance_hash: checked.acceptance_hash, accepted_count, required_count }
}

pub fn execute<S: RecordStore>(
    store: &mut S,
    ctx: &CallContext,
    intent_hash: FixedBytes<32>,
    payload: &[u8],
    execution_data: &[u8],
) -> Result<Executed, CoordinationError> {
    let intent = load(store, intent_hash)?;
    check_len(payload.len(), MAX_PAYLOAD_LEN)?;
    check_len(execution_data.len(), MAX_PAYLOAD_LEN)?;
    if intent.status != IntentStatus::Ready {
        return Err(CoordinationError::InvalidState { intent_hash, status: intent.status });
    }
    if ctx.now > intent.expiry {
        return Err(CoordinationError::ExpiredIntent { expiry: intent.expiry, now: ctx.now });
    }
    for participant in &intent.participants {
        // Ready implies every participant has a record; a missing one is treated as stale.
        let expiry = store.acceptance(intent_hash, *participant).map(|a| a.expiry).unwrap_or(0);
        if expiry < ctx.now {
            return Err(CoordinationError::ExpiredAcceptance { participant: *participant, expiry });
        }
    }
    let actual = keccak256(payload);
    if actual != intent.payload_hash {
        return Err(CoordinationError::PayloadMismatch { expected: intent.payload_hash, actual });
    }

    store.update_intent(intent_hash, IntentStatus::Executed, intent.accept_count);

    Ok(Executed { success: true, result: execution_data.to_vec() })
}

/// Returns the final (stored) status.
pub fn cancel<S: RecordStore>(
    store: &mut S,
    ctx: &CallContext,
    intent_hash: FixedBytes<32>,
    reason: &str,
) -> Result<IntentStatus, CoordinationError> {
    let intent = load(store, intent_hash)?;
    check_len(reason.chars().count(), MAX_REASON_LEN)?;
    if intent.status.is_terminal() {
        return Err(CoordinationError::InvalidState { intent_hash, status: intent.status });
    }
    if ctx.caller != intent.agent && ctx.now <= intent.expiry {
        return Err(CoordinationError::Unauthorized { caller: ctx.caller });
    }

    store.update_intent(intent_hash, IntentStatus::Cancelled, intent.accept_count);
    Ok(IntentStatus::Cancelled)
}

pub fn status<S: RecordStore>(store: &S, now: u64, intent_hash: FixedBytes<32>) -> Result<StatusView, CoordinationError> {
    let intent = load(store, intent_hash)?;
    let mut accepted_by = Vec::with_capacity(intent.participants.len());
    for participant in &intent.participants {
        if store.acceptance(intent_hash, *participant).is_some() {
            accepted_by.push(*participant);
        }
    }
    Ok(StatusView {
        status: intent.status.effective(intent.expiry, now),
        agent: intent.agent,
        expiry: intent.expiry,
        participants: intent.participants,
        accepted_by,
    })
}

pub fn required_acceptances<S: RecordStore>(store: &S, intent_hash: FixedBytes<32>) -> Result<u8, CoordinationError> {
    Ok(load(store, intent_hash)?.required_acceptances())
}

fn load<S: RecordStore>(store: &S, intent_hash: FixedBytes<32>) -> Result<IntentRecord, CoordinationError> {
    store.intent(intent_hash).ok_or(CoordinationError::NotFound { intent_hash })
}

fn check_len(len: usize, limit: usize) -> Result<(), CoordinationError> {
    if len > limit {
        return Err(CoordinationError::InputTooLarge { len, limit });
    }
    Ok(())
}
