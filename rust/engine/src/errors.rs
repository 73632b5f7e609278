use thiserror::Error;

use crate::board::Pos;
use crate::piece::{PieceId, Side};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("board is not in a playable state")]
    NotPlaying,
    #[error("it's not {side:?}'s turn")]
    NotYourTurn { side: Side },
    #[error("piece {0} not found")]
    PieceNotFound(PieceId),
    #[error("no piece selected")]
    NoSelection,
    #[error("illegal move to {to}")]
    IllegalMove { to: Pos },
    #[error("an attack animation is pending")]
    AnimationPending,
    #[error("no attack animation is pending")]
    NoPendingAnimation,
    #[error("no combat in progress")]
    NoCombatInProgress,
    #[error("combat already in progress")]
    CombatInProgress,
    #[error("action not valid in phase {phase}")]
    WrongPhase { phase: &'static str },
    #[error("betting round is not settled")]
    RoundNotSettled,
    #[error("betting is closed for this hand")]
    BettingClosed,
    #[error("invalid commitment: {amount}, available: {available}")]
    InvalidCommitment { amount: u32, available: u32 },
    #[error("cannot defend facing an outstanding commitment of {to_match}")]
    DefendFacingBet { to_match: u32 },
    #[error("not enough stamina to raise")]
    OutOfStamina,
    #[error("hand is already complete")]
    HandComplete,
    #[error("hand is still in progress")]
    HandInProgress,
    #[error("no hand transition is pending")]
    NoTransitionPending,
    #[error("combat is not finished")]
    CombatUnfinished,
    #[error("combat is already decided")]
    CombatFinished,
    #[error("deck exhausted")]
    DeckExhausted,
    #[error("invalid army configuration: {0}")]
    InvalidArmy(String),
    #[error("mulligan already used this hand")]
    MulliganUsed,
    #[error("hole cards already full")]
    HoleCardsFull,
}
