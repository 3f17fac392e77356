//! Outcomes: the state changes a piece can cause.
//!
//! An [`Outcome`] is an immutable record produced by an [`Action`](crate::Action)
//! during a board update. [`Outcome::realize`] is the only way rules mutate a
//! board.

use crate::{Board, EngineError, PieceId};
use skirmish_core::{Faction, PieceKind, Position, Vector};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Outcomes keyed by their target tile.
pub type Outcomes = BTreeMap<Position, Outcome>;

/// A piece as it stood when an outcome was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub id: PieceId,
    pub position: Position,
}

/// Per-piece side effect applied to the acting piece after the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    /// Mark the piece capturable en passant until its faction's next turn.
    FlagEnPassant,
    /// Start lurking (arms the sentry ambush).
    EnableLurk,
    /// Stop lurking.
    DisableLurk,
    /// Stop lurking and block jumping for the given number of own turns.
    JumpCooldown(u8),
    /// Remove the acting piece from the board.
    SelfDestruct,
}

/// The board mutation an outcome performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Move {
        piece: PieceRef,
        target: Position,
    },
    /// Moves onto `target` after removing every captured piece. A captured
    /// piece standing on `target` is displaced by the move itself.
    Capture {
        piece: PieceRef,
        target: Position,
        captured: Vec<PieceRef>,
    },
    Promote {
        piece: PieceRef,
        target: Position,
        into: PieceKind,
    },
    Castle {
        king: PieceRef,
        rook: PieceRef,
    },
    Summon {
        piece: PieceRef,
        target: Position,
        kind: PieceKind,
        faction: Faction,
    },
}

/// A realizable state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    kind: OutcomeKind,
    faction: Faction,
    leadership_delta: i32,
    effect: Effect,
    end_turn: bool,
}

impl Outcome {
    fn new(kind: OutcomeKind, faction: Faction) -> Self {
        Outcome {
            kind,
            faction,
            leadership_delta: 0,
            effect: Effect::None,
            end_turn: true,
        }
    }

    pub fn move_to(piece: PieceRef, faction: Faction, target: Position) -> Self {
        Self::new(OutcomeKind::Move { piece, target }, faction)
    }

    pub fn capture(
        piece: PieceRef,
        faction: Faction,
        target: Position,
        captured: Vec<PieceRef>,
    ) -> Self {
        Self::new(
            OutcomeKind::Capture {
                piece,
                target,
                captured,
            },
            faction,
        )
    }

    pub fn promote(piece: PieceRef, faction: Faction, target: Position, into: PieceKind) -> Self {
        Self::new(
            OutcomeKind::Promote {
                piece,
                target,
                into,
            },
            faction,
        )
    }

    pub fn castle(king: PieceRef, rook: PieceRef, faction: Faction) -> Self {
        Self::new(OutcomeKind::Castle { king, rook }, faction)
    }

    pub fn summon(
        piece: PieceRef,
        faction: Faction,
        target: Position,
        kind: PieceKind,
        summoned_faction: Faction,
    ) -> Self {
        Self::new(
            OutcomeKind::Summon {
                piece,
                target,
                kind,
                faction: summoned_faction,
            },
            faction,
        )
    }

    /// Sets the signed leadership change for the acting faction.
    pub fn with_leadership(mut self, delta: i32) -> Self {
        self.leadership_delta = delta;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Leaves the turn with the acting faction after realization.
    pub fn keep_turn(mut self) -> Self {
        self.end_turn = false;
        self
    }

    pub fn kind(&self) -> &OutcomeKind {
        &self.kind
    }

    /// The acting faction.
    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn leadership_delta(&self) -> i32 {
        self.leadership_delta
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn end_turn(&self) -> bool {
        self.end_turn
    }

    /// The piece that acts.
    pub fn actor(&self) -> PieceRef {
        match &self.kind {
            OutcomeKind::Move { piece, .. }
            | OutcomeKind::Capture { piece, .. }
            | OutcomeKind::Promote { piece, .. }
            | OutcomeKind::Summon { piece, .. } => *piece,
            OutcomeKind::Castle { king, .. } => *king,
        }
    }

    /// The tile this outcome is offered on. For a castle that is the king's
    /// destination.
    pub fn target(&self) -> Position {
        match &self.kind {
            OutcomeKind::Move { target, .. }
            | OutcomeKind::Capture { target, .. }
            | OutcomeKind::Promote { target, .. }
            | OutcomeKind::Summon { target, .. } => *target,
            OutcomeKind::Castle { king, rook } => {
                king.position + castle_step(king.position, rook.position) * 2
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            OutcomeKind::Move { .. } => "move",
            OutcomeKind::Capture { .. } => "capture",
            OutcomeKind::Promote { .. } => "promote",
            OutcomeKind::Castle { .. } => "castle",
            OutcomeKind::Summon { .. } => "summon",
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, OutcomeKind::Capture { .. })
    }

    /// Every piece reference the outcome relies on.
    fn references(&self) -> Vec<PieceRef> {
        match &self.kind {
            OutcomeKind::Move { piece, .. }
            | OutcomeKind::Promote { piece, .. }
            | OutcomeKind::Summon { piece, .. } => vec![*piece],
            OutcomeKind::Capture {
                piece, captured, ..
            } => std::iter::once(*piece).chain(captured.iter().copied()).collect(),
            OutcomeKind::Castle { king, rook } => vec![*king, *rook],
        }
    }

    /// Applies the outcome to `board` and returns whether the turn ends.
    ///
    /// Every referenced piece must still stand where it stood when the outcome
    /// was generated. The variant's mutation runs first, then the effect on the
    /// acting piece, then the leadership change (clamped to the board's
    /// bounds). Turn bookkeeping is left to [`Board::realize`].
    ///
    /// # Errors
    ///
    /// [`EngineError::StaleOutcome`] if a referenced piece moved or vanished,
    /// [`EngineError::UnknownFaction`] if the acting faction is not on the
    /// board, and [`EngineError::SummonTargetOccupied`] for a summon onto an
    /// occupied tile.
    pub fn realize(&self, board: &mut Board) -> Result<bool, EngineError> {
        board.leadership(self.faction)?;
        for reference in self.references() {
            match board.piece_at(reference.position) {
                Some(piece) if piece.id() == reference.id => {}
                _ => {
                    return Err(EngineError::StaleOutcome(format!(
                        "piece {} is no longer at {}",
                        reference.id, reference.position
                    )))
                }
            }
        }

        let actor_at = match &self.kind {
            OutcomeKind::Move { piece, target } => {
                board.move_piece(piece.position, *target)?;
                *target
            }
            OutcomeKind::Capture {
                piece,
                target,
                captured,
            } => {
                for victim in captured {
                    if victim.position != *target {
                        board.remove_piece(victim.position)?;
                    }
                }
                board.move_piece(piece.position, *target)?;
                *target
            }
            OutcomeKind::Promote {
                piece,
                target,
                into,
            } => {
                board.move_piece(piece.position, *target)?;
                let old = board.remove_piece(*target)?;
                board.spawn_piece(*target, *into, old.faction())?;
                info!(faction = %old.faction(), at = %target, into = %into, "promoted");
                *target
            }
            OutcomeKind::Castle { king, rook } => {
                let step = castle_step(king.position, rook.position);
                let king_to = king.position + step * 2;
                board.move_piece(king.position, king_to)?;
                board.move_piece(rook.position, king_to - step)?;
                king_to
            }
            OutcomeKind::Summon {
                piece,
                target,
                kind,
                faction,
            } => {
                if board.piece_at(*target).is_some() {
                    return Err(EngineError::SummonTargetOccupied(*target));
                }
                let faction = if board.turn_order().contains(faction) {
                    *faction
                } else {
                    self.faction
                };
                board.spawn_piece(*target, *kind, faction)?;
                info!(%faction, at = %target, kind = %kind, "summoned");
                piece.position
            }
        };

        board.apply_effect(actor_at, self.effect)?;
        board.update_leadership(self.faction, self.leadership_delta)?;
        debug!(outcome = %self, "realized");
        Ok(self.end_turn)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = self.actor();
        write!(
            f,
            "{} {} {} -> {}",
            self.faction,
            self.name(),
            actor.position,
            self.target()
        )?;
        if self.leadership_delta != 0 {
            write!(f, " ({:+})", self.leadership_delta)?;
        }
        Ok(())
    }
}

/// Unit step from the king toward the rook.
fn castle_step(king: Position, rook: Position) -> Vector {
    (rook - king).signum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::StateSnapshot;

    fn board(snapshot: StateSnapshot) -> Board {
        Board::from_snapshot(&snapshot).unwrap()
    }

    fn reference(board: &Board, x: i32, y: i32) -> PieceRef {
        board.piece_at(Position::new(x, y)).unwrap().as_ref()
    }

    fn two_sided(width: usize, height: usize) -> StateSnapshot {
        StateSnapshot::empty(width, height, &[Faction::White, Faction::Black], 3)
    }

    #[test]
    fn move_relocates_piece() {
        let mut board = board(two_sided(4, 4).with_piece(
            Position::new(0, 3),
            PieceKind::Rook,
            Faction::White,
        ));
        let rook = reference(&board, 0, 3);
        let outcome = Outcome::move_to(rook, Faction::White, Position::new(0, 0));
        assert!(outcome.realize(&mut board).unwrap());
        assert!(board.piece_at(Position::new(0, 3)).is_none());
        let moved = board.piece_at(Position::new(0, 0)).unwrap();
        assert_eq!(moved.id(), rook.id);
        assert_eq!(moved.position(), Position::new(0, 0));
        assert_eq!(moved.move_count(), 1);
    }

    #[test]
    fn capture_on_target_replaces_occupant() {
        let mut board = board(
            two_sided(4, 4)
                .with_piece(Position::new(0, 3), PieceKind::Rook, Faction::White)
                .with_piece(Position::new(0, 0), PieceKind::Pawn, Faction::Black),
        );
        let rook = reference(&board, 0, 3);
        let pawn = reference(&board, 0, 0);
        let outcome = Outcome::capture(rook, Faction::White, Position::new(0, 0), vec![pawn]);
        outcome.realize(&mut board).unwrap();
        assert_eq!(board.pieces().count(), 1);
        assert_eq!(board.piece_at(Position::new(0, 0)).unwrap().id(), rook.id);
    }

    #[test]
    fn capture_clears_distinct_victim_tile() {
        let mut board = board(
            two_sided(4, 4)
                .with_piece(Position::new(1, 2), PieceKind::Pawn, Faction::White)
                .with_piece(Position::new(2, 2), PieceKind::Pawn, Faction::Black),
        );
        let pawn = reference(&board, 1, 2);
        let victim = reference(&board, 2, 2);
        let outcome = Outcome::capture(pawn, Faction::White, Position::new(2, 1), vec![victim]);
        outcome.realize(&mut board).unwrap();
        assert!(board.piece_at(Position::new(2, 2)).is_none());
        assert_eq!(board.piece_at(Position::new(2, 1)).unwrap().id(), pawn.id);
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn castle_geometry() {
        let mut board = board(
            two_sided(8, 8)
                .with_piece(Position::new(4, 7), PieceKind::King, Faction::White)
                .with_piece(Position::new(7, 7), PieceKind::Rook, Faction::White),
        );
        let king = reference(&board, 4, 7);
        let rook = reference(&board, 7, 7);
        let outcome = Outcome::castle(king, rook, Faction::White);
        assert_eq!(outcome.target(), Position::new(6, 7));
        outcome.realize(&mut board).unwrap();
        assert_eq!(board.piece_at(Position::new(6, 7)).unwrap().id(), king.id);
        assert_eq!(board.piece_at(Position::new(5, 7)).unwrap().id(), rook.id);
        assert!(board.piece_at(Position::new(4, 7)).is_none());
        assert!(board.piece_at(Position::new(7, 7)).is_none());
    }

    #[test]
    fn promotion_replaces_piece() {
        let mut board = board(two_sided(4, 4).with_piece(
            Position::new(1, 1),
            PieceKind::Pawn,
            Faction::White,
        ));
        let pawn = reference(&board, 1, 1);
        let outcome = Outcome::promote(pawn, Faction::White, Position::new(1, 0), PieceKind::Queen);
        outcome.realize(&mut board).unwrap();
        let queen = board.piece_at(Position::new(1, 0)).unwrap();
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert_eq!(queen.faction(), Faction::White);
        assert_ne!(queen.id(), pawn.id);
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn summon_onto_occupied_tile_is_fatal() {
        let mut board = board(
            two_sided(4, 4)
                .with_piece(Position::new(1, 1), PieceKind::Summoner, Faction::White)
                .with_piece(Position::new(2, 1), PieceKind::Pawn, Faction::Black),
        );
        let summoner = reference(&board, 1, 1);
        let outcome = Outcome::summon(
            summoner,
            Faction::White,
            Position::new(2, 1),
            PieceKind::Zombie,
            Faction::White,
        );
        assert!(matches!(
            outcome.realize(&mut board),
            Err(EngineError::SummonTargetOccupied(p)) if p == Position::new(2, 1)
        ));
    }

    #[test]
    fn summon_falls_back_to_summoner_faction() {
        let mut board = board(two_sided(4, 4).with_piece(
            Position::new(1, 1),
            PieceKind::Summoner,
            Faction::White,
        ));
        let summoner = reference(&board, 1, 1);
        let outcome = Outcome::summon(
            summoner,
            Faction::White,
            Position::new(2, 1),
            PieceKind::Zombie,
            Faction::WhiteAuto,
        )
        .with_leadership(-2);
        outcome.realize(&mut board).unwrap();
        let zombie = board.piece_at(Position::new(2, 1)).unwrap();
        assert_eq!(zombie.kind(), PieceKind::Zombie);
        assert_eq!(zombie.faction(), Faction::White);
        assert_eq!(board.leadership(Faction::White).unwrap(), 1);
    }

    #[test]
    fn stale_reference_is_rejected() {
        let mut board = board(two_sided(4, 4).with_piece(
            Position::new(0, 3),
            PieceKind::Rook,
            Faction::White,
        ));
        let rook = reference(&board, 0, 3);
        let first = Outcome::move_to(rook, Faction::White, Position::new(0, 2));
        let second = Outcome::move_to(rook, Faction::White, Position::new(0, 1));
        first.realize(&mut board).unwrap();
        assert!(matches!(
            second.realize(&mut board),
            Err(EngineError::StaleOutcome(_))
        ));
    }

    #[test]
    fn unknown_faction_is_rejected() {
        let mut board = board(two_sided(4, 4).with_piece(
            Position::new(0, 3),
            PieceKind::Rook,
            Faction::White,
        ));
        let rook = reference(&board, 0, 3);
        let outcome = Outcome::move_to(rook, Faction::BlackAuto, Position::new(0, 2));
        assert!(matches!(
            outcome.realize(&mut board),
            Err(EngineError::UnknownFaction(Faction::BlackAuto))
        ));
    }

    #[test]
    fn self_destruct_removes_actor() {
        let mut board = board(
            two_sided(5, 5)
                .with_piece(Position::new(0, 4), PieceKind::Berserker, Faction::White)
                .with_piece(Position::new(1, 3), PieceKind::Pawn, Faction::Black)
                .with_piece(Position::new(2, 2), PieceKind::Pawn, Faction::Black),
        );
        let berserker = reference(&board, 0, 4);
        let near = reference(&board, 1, 3);
        let far = reference(&board, 2, 2);
        let outcome = Outcome::capture(berserker, Faction::White, far.position, vec![near, far])
            .with_leadership(-1)
            .with_effect(Effect::SelfDestruct);
        outcome.realize(&mut board).unwrap();
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board.leadership(Faction::White).unwrap(), 2);
    }

    #[test]
    fn display_names_the_move() {
        let outcome = Outcome::move_to(
            PieceRef {
                id: 1,
                position: Position::new(0, 3),
            },
            Faction::White,
            Position::new(0, 2),
        )
        .with_leadership(1);
        assert_eq!(outcome.to_string(), "White move (0, 3) -> (0, 2) (+1)");
        assert!(outcome.end_turn());
        assert!(!outcome.clone().keep_turn().end_turn());
    }
}
