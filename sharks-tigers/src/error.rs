use crate::types::Amount;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Every rejection a game or the factory can return. All failures are
/// synchronous and leave the game in its prior valid state; a corrected
/// call may be retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid mark for board")]
    InvalidMark,

    #[error("Game creation requires a wager")]
    NoWager,

    #[error("Wager exceeds the escrowable maximum")]
    ExcessiveWager,

    #[error("Position is out of range: {0}")]
    PositionOutOfRange(usize),

    #[error("Position is already marked: {0}")]
    PositionTaken(usize),

    #[error("Play clock must be positive and expiration in the future")]
    InvalidClock,

    #[error("Game is not open to joining")]
    NotOpen,

    #[error("Game expired before a second player joined")]
    Expired,

    #[error("Incorrect wager amount: expected {expected}, paid {paid}")]
    WrongWager { expected: Amount, paid: Amount },

    #[error("Game is not active")]
    NotActive,

    #[error("You are not the current player")]
    NotYourTurn,

    #[error("You ran out of time to make a move")]
    TimeExpired,

    #[error("Game is not ended")]
    NotEnded,

    #[error("No winner, game ended in a draw")]
    NoWinnerDraw,

    #[error("Only the winner can claim the reward")]
    NotWinner,

    #[error("Reward already claimed")]
    AlreadyClaimed,

    #[error("Game is not a draw, the winner must claim the reward")]
    WinnerMustClaim,

    #[error("Nothing to withdraw")]
    NothingToWithdraw,
}
