//! Engine error type.

use skirmish_core::{Faction, Position, SnapshotError};
use thiserror::Error;

/// Errors raised by the rules engine.
///
/// These are invariant violations and configuration bugs. Expected rule
/// rejections (an unaffordable outcome, two rules offering the same target)
/// are logged and skipped instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A faction that is not part of the turn order was referenced.
    #[error("faction {0} is not part of this board's turn order")]
    UnknownFaction(Faction),

    /// A summon outcome targeted an occupied tile.
    #[error("cannot summon onto occupied tile {0}")]
    SummonTargetOccupied(Position),

    /// A piece was expected at a position but none was found.
    #[error("no piece at {0}")]
    NoPieceAt(Position),

    /// A position outside the board was used for a mutation.
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    /// A piece was placed onto a tile that already holds one.
    #[error("tile {0} is already occupied")]
    Occupied(Position),

    /// The outcome was computed before an intervening board mutation.
    #[error("stale outcome: {0}")]
    StaleOutcome(String),

    /// The outcome belongs to a faction whose turn it is not.
    #[error("it is {expected}'s turn, not {found}'s")]
    OutOfTurn { expected: Faction, found: Faction },

    /// No faction can act any more.
    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
