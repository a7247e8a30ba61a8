//! Stylus entrypoint for multi-party agent coordination.
//!
//! An agent proposes an intent naming a canonical participant set; every participant submits a
//! signed, time-bounded acceptance; once all have accepted (and the acceptances are still fresh)
//! anyone may execute it by revealing the payload whose hash the intent commits to.
//!
//! The lifecycle logic lives in [`crate::coordinator`]; this module captures the call context,
//! backs the record store with contract storage, and emits one event per successful mutation.
//! What an executed intent *does* is left to consumers of `CoordinationExecuted`.

use alloc::{string::String, vec, vec::Vec};

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256, U64},
    prelude::*,
    stylus_core::log,
};

use agent_coordination_types::{
    digest::{self, Domain, IntentFields},
    IntentStatus,
};

use crate::{
    constants::{DOMAIN_NAME, DOMAIN_VERSION},
    coordinator::{self, CallContext, CheckedAcceptance, ProposeParams},
    errors::CoordinationError,
    interfaces::{
        AgentCoordinationError, CoordinationAccepted, CoordinationCancelled, CoordinationExecuted,
        CoordinationProposed,
    },
    store::{
        onchain::{StoredAcceptance, StoredIntent},
        AcceptanceRecord, IntentRecord, RecordStore,
    },
    utils::crypto::EcrecoverPrecompile,
};

sol_storage! {
    #[entrypoint]
    pub struct AgentCoordination {
        /// Intent records keyed by intent hash (the intent struct hash).
        mapping(bytes32 => StoredIntent) intents;

        /// Last nonce used per agent (0 if never seen).
        mapping(address => uint64) agent_nonces;

        /// Acceptances keyed by (intent hash, participant).
        mapping(bytes32 => mapping(address => StoredAcceptance)) acceptances;
    }
}

#[public]
impl AgentCoordination {
    /// Publish a new intent; the caller is the agent. Returns the intent hash.
    pub fn propose(
        &mut self,
        payload_hash: FixedBytes<32>,
        expiry: u64,
        nonce: u64,
        coordination_type: FixedBytes<32>,
        coordination_value: U256,
        participants: Vec<Address>,
    ) -> Result<FixedBytes<32>, AgentCoordinationError> {
        let ctx = self.call_context();
        let proposed = coordinator::propose(
            self,
            &ctx,
            ProposeParams {
                payload_hash,
                expiry,
                nonce,
                coordination_type,
                coordination_value,
                participants,
            },
        )?;

        log(
            self.vm(),
            CoordinationProposed {
                intentHash: proposed.intent_hash,
                proposer: ctx.caller,
                coordinationType: coordination_type,
                participantCount: U256::from(proposed.participant_count),
                coordinationValue: coordination_value,
            },
        );
        Ok(proposed.intent_hash)
    }

    /// Record the caller's signed acceptance. Returns true once every participant has accepted.
    ///
    /// `signature` is `r || s || v` over the acceptance digest (see `computeAcceptanceDigest`).
    pub fn accept(
        &mut self,
        intent_hash: FixedBytes<32>,
        accept_expiry: u64,
        conditions: FixedBytes<32>,
        signature: Bytes,
    ) -> Result<bool, AgentCoordinationError> {
        let ctx = self.call_context();
        let checked = coordinator::check_acceptance(
            &*self,
            &EcrecoverPrecompile::new(self.vm()),
            &ctx,
            intent_hash,
            accept_expiry,
            conditions,
            &signature,
        )?;
        Ok(self.record_acceptance(&ctx, checked))
    }

    /// Execute a fully accepted intent. `execution_data` is not interpreted and is returned as the
    /// result.
    pub fn execute(
        &mut self,
        intent_hash: FixedBytes<32>,
        payload: Bytes,
        execution_data: Bytes,
    ) -> Result<(bool, Bytes), AgentCoordinationError> {
        let ctx = self.call_context();
        let executed = coordinator::execute(self, &ctx, intent_hash, &payload, &execution_data)?;

        log(
            self.vm(),
            CoordinationExecuted {
                intentHash: intent_hash,
                executor: ctx.caller,
                success: executed.success,
                result: executed.result.clone().into(),
            },
        );
        Ok((executed.success, Bytes::from(executed.result)))
    }

    /// Cancel a live intent. Only the agent may cancel before expiry; anyone may after.
    pub fn cancel(&mut self, intent_hash: FixedBytes<32>, reason: String) -> Result<bool, AgentCoordinationError> {
        let ctx = self.call_context();
        let final_status = coordinator::cancel(self, &ctx, intent_hash, &reason)?;

        log(
            self.vm(),
            CoordinationCancelled {
                intentHash: intent_hash,
                canceller: ctx.caller,
                reason,
                finalStatus: final_status.into(),
            },
        );
        Ok(true)
    }

    /// `(status, agent, participants, acceptedBy, expiry)` with expiry folded into `status`.
    pub fn get_status(
        &self,
        intent_hash: FixedBytes<32>,
    ) -> Result<(u8, Address, Vec<Address>, Vec<Address>, u64), AgentCoordinationError> {
        let view = coordinator::status(self, self.vm().block_timestamp(), intent_hash)?;
        Ok((view.status.into(), view.agent, view.participants, view.accepted_by, view.expiry))
    }

    pub fn get_required_acceptances(&self, intent_hash: FixedBytes<32>) -> Result<U256, AgentCoordinationError> {
        Ok(U256::from(coordinator::required_acceptances(self, intent_hash)?))
    }

    pub fn get_agent_nonce(&self, agent: Address) -> u64 {
        self.agent_nonce(agent)
    }

    /// Raw stored record:
    /// `(agent, payloadHash, expiry, nonce, coordinationType, coordinationValue, storedStatus, acceptCount)`.
    pub fn get_intent(
        &self,
        intent_hash: FixedBytes<32>,
    ) -> Result<(Address, FixedBytes<32>, u64, u64, FixedBytes<32>, U256, u8, u8), AgentCoordinationError> {
        let record = self.intent(intent_hash).ok_or(CoordinationError::NotFound { intent_hash })?;
        Ok((
            record.agent,
            record.payload_hash,
            record.expiry,
            record.nonce,
            record.coordination_type,
            record.coordination_value,
            record.status.into(),
            record.accept_count,
        ))
    }

    /// `(accepted, acceptExpiry, conditions)`; all zero when no acceptance exists.
    pub fn get_acceptance(&self, intent_hash: FixedBytes<32>, participant: Address) -> (bool, u64, FixedBytes<32>) {
        match self.acceptance(intent_hash, participant) {
            Some(a) => (true, a.expiry, a.conditions),
            None => (false, 0, FixedBytes::ZERO),
        }
    }

    /// Exact constants used by the digest engine, for off-chain signers:
    /// `(name, version, verifyingContract, chainId, domainSeparator, intentTypeHash, acceptanceTypeHash)`.
    pub fn get_domain_constants(
        &self,
    ) -> (String, String, Address, U256, FixedBytes<32>, FixedBytes<32>, FixedBytes<32>) {
        let domain = self.domain();
        (
            String::from(DOMAIN_NAME),
            String::from(DOMAIN_VERSION),
            domain.verifying_contract,
            U256::from(domain.chain_id),
            domain.separator(),
            digest::intent_type_hash(),
            digest::acceptance_type_hash(),
        )
    }

    pub fn domain_separator(&self) -> FixedBytes<32> {
        self.domain().separator()
    }

    /// The hash `propose` would return for these fields if called by `agent`.
    pub fn compute_intent_hash(
        &self,
        payload_hash: FixedBytes<32>,
        expiry: u64,
        nonce: u64,
        agent: Address,
        coordination_type: FixedBytes<32>,
        coordination_value: U256,
        participants: Vec<Address>,
    ) -> FixedBytes<32> {
        digest::intent_struct_hash(&IntentFields {
            payload_hash,
            expiry,
            nonce,
            agent,
            coordination_type,
            coordination_value,
            participants: &participants,
        })
    }

    /// The digest `participant` must sign to accept `intent_hash`.
    pub fn compute_acceptance_digest(
        &self,
        intent_hash: FixedBytes<32>,
        participant: Address,
        accept_expiry: u64,
        conditions: FixedBytes<32>,
    ) -> FixedBytes<32> {
        let struct_hash = digest::acceptance_struct_hash(intent_hash, participant, accept_expiry, conditions);
        digest::acceptance_digest(self.domain_separator(), struct_hash)
    }

    pub fn is_canonical(&self, participants: Vec<Address>) -> bool {
        agent_coordination_types::is_canonical(&participants)
    }
}

impl AgentCoordination {
    fn domain(&self) -> Domain {
        Domain::new(self.vm().chain_id(), self.vm().contract_address())
    }

    fn call_context(&self) -> CallContext {
        CallContext {
            caller: self.vm().msg_sender(),
            now: self.vm().block_timestamp(),
            domain: self.domain(),
        }
    }

    /// Stores a checked acceptance and emits `CoordinationAccepted`.
    fn record_acceptance(&mut self, ctx: &CallContext, checked: CheckedAcceptance) -> bool {
        let intent_hash = checked.intent_hash;
        let accepted = coordinator::record_acceptance(self, checked);

        log(
            self.vm(),
            CoordinationAccepted {
                intentHash: intent_hash,
                participant: ctx.caller,
                acceptanceHash: accepted.acceptance_hash,
                acceptedCount: U256::from(accepted.accepted_count),
                requiredCount: U256::from(accepted.required_count),
            },
        );
        accepted.fully_accepted()
    }

    /// `accept` with an off-chain verifier in place of the precompile.
    #[cfg(test)]
    fn accept_with<V: agent_coordination_types::SignatureVerifier>(
        &mut self,
        verifier: &V,
        intent_hash: FixedBytes<32>,
        accept_expiry: u64,
        conditions: FixedBytes<32>,
        signature: &[u8],
    ) -> Result<bool, AgentCoordinationError> {
        let ctx = self.call_context();
        let checked =
            coordinator::check_acceptance(&*self, verifier, &ctx, intent_hash, accept_expiry, conditions, signature)?;
        Ok(self.record_acceptance(&ctx, checked))
    }
}

impl RecordStore for AgentCoordination {
    fn intent(&self, intent_hash: FixedBytes<32>) -> Option<IntentRecord> {
        self.intents.getter(intent_hash).read_record()
    }

    fn intent_exists(&self, intent_hash: FixedBytes<32>) -> bool {
        self.intents.getter(intent_hash).exists()
    }

    fn insert_intent(&mut self, intent_hash: FixedBytes<32>, record: &IntentRecord) {
        self.intents.setter(intent_hash).write_record(record);
    }

    fn update_intent(&mut self, intent_hash: FixedBytes<32>, status: IntentStatus, accept_count: u8) {
        self.intents.setter(intent_hash).set_progress(status, accept_count);
    }

    fn agent_nonce(&self, agent: Address) -> u64 {
        self.agent_nonces.get(agent).to::<u64>()
    }

    fn set_agent_nonce(&mut self, agent: Address, nonce: u64) {
        self.agent_nonces.insert(agent, U64::from(nonce));
    }

    fn acceptance(&self, intent_hash: FixedBytes<32>, participant: Address) -> Option<AcceptanceRecord> {
        let per_intent = self.acceptances.getter(intent_hash);
        let acceptance = per_intent.getter(participant);
        acceptance.read_record()
    }

    fn insert_acceptance(&mut self, intent_hash: FixedBytes<32>, participant: Address, record: &AcceptanceRecord) {
        let mut per_intent = self.acceptances.setter(intent_hash);
        let mut acceptance = per_intent.setter(participant);
        acceptance.write_record(record);
    }
}
