//! Solidity ABI surface: events and custom errors.

use alloy_primitives::U256;
use stylus_sdk::{alloy_sol_types::sol, stylus_proc::SolidityError};

use crate::errors::CoordinationError;

sol! {
    event CoordinationProposed(
        bytes32 indexed intentHash,
        address indexed proposer,
        bytes32 coordinationType,
        uint256 participantCount,
        uint256 coordinationValue
    );
    event CoordinationAccepted(
        bytes32 indexed intentHash,
        address indexed participant,
        bytes32 acceptanceHash,
        uint256 acceptedCount,
        uint256 requiredCount
    );
    event CoordinationExecuted(bytes32 indexed intentHash, address indexed executor, bool success, bytes result);
    event CoordinationCancelled(bytes32 indexed intentHash, address indexed canceller, string reason, uint8 finalStatus);

    error Unauthorized(address caller);
    error NotFound(bytes32 intentHash);
    error InvalidState(bytes32 intentHash, uint8 status);
    error InvalidSignature(address participant);
    error NotParticipant(address caller);
    error AlreadyAccepted(address participant);
    error ExpiredIntent(uint64 expiry, uint64 currentTime);
    error NonceTooLow(uint64 nonce, uint64 current);
    error InvalidParticipants();
    error IntentAlreadyExists(bytes32 intentHash);
    error ExpiredAcceptance(address participant, uint64 expiry);
    error PayloadMismatch(bytes32 expected, bytes32 actual);
    error InputTooLarge(uint256 length, uint256 limit);
}

#[derive(SolidityError)]
pub enum AgentCoordinationError {
    Unauthorized(Unauthorized),
    NotFound(NotFound),
    InvalidState(InvalidState),
    InvalidSignature(InvalidSignature),
    NotParticipant(NotParticipant),
    AlreadyAccepted(AlreadyAccepted),
    ExpiredIntent(ExpiredIntent),
    NonceTooLow(NonceTooLow),
    InvalidParticipants(InvalidParticipants),
    IntentAlreadyExists(IntentAlreadyExists),
    ExpiredAcceptance(ExpiredAcceptance),
    PayloadMismatch(PayloadMismatch),
    InputTooLarge(InputTooLarge),
}

impl From<CoordinationError> for AgentCoordinationError {
    fn from(err: CoordinationError) -> Self {
        use AgentCoordinationError as E;
        match err {
            CoordinationError::Unauthorized { caller } => E::Unauthorized(Unauthorized { caller }),
            CoordinationError::NotFound { intent_hash } => E::NotFound(NotFound { intentHash: intent_hash }),
            CoordinationError::InvalidState { intent_hash, status } => E::InvalidState(InvalidState {
                intentHash: intent_hash,
                status: status.into(),
            }),
            CoordinationError::InvalidSignature { participant } => {
                E::InvalidSignature(InvalidSignature { participant })
            }
            CoordinationError::NotParticipant { caller } => E::NotParticipant(NotParticipant { caller }),
            CoordinationError::AlreadyAccepted { participant } => {
                E::AlreadyAccepted(AlreadyAccepted { participant })
            }
            CoordinationError::ExpiredIntent { expiry, now } => E::ExpiredIntent(ExpiredIntent { expiry, currentTime: now }),
            CoordinationError::NonceTooLow { nonce, current } => E::NonceTooLow(NonceTooLow { nonce, current }),
            CoordinationError::InvalidParticipants => E::InvalidParticipants(InvalidParticipants {}),
            CoordinationError::IntentAlreadyExists { intent_hash } => {
                E::IntentAlreadyExists(IntentAlreadyExists { intentHash: intent_hash })
            }
            CoordinationError::ExpiredAcceptance { participant, expiry } => {
                E::ExpiredAcceptance(ExpiredAcceptance { participant, expiry })
            }
            CoordinationError::PayloadMismatch { expected, actual } => {
                E::PayloadMismatch(PayloadMismatch { expected, actual })
            }
            CoordinationError::InputTooLarge { len, limit } => E::InputTooLarge(InputTooLarge {
                length: U256::from(len),
                limit: U256::from(limit),
            }),
        }
    }
}

