//! Foot-soldier rules: forward advances, diagonal strikes and en passant.

use super::EN_PASSANT_GRANT;
use crate::outcome::Effect;
use crate::piece::LineCast;
use crate::{Action, Board, Outcome, OutcomeSink, Piece};
use skirmish_core::{dir, PieceKind};

/// Forward movement that never captures.
///
/// The second step of a double advance flags the piece as capturable en
/// passant.
#[derive(Debug, Clone, Copy)]
pub struct Advance {
    pub name: &'static str,
    /// Steps allowed before the piece has moved.
    pub first_steps: i32,
    /// Steps allowed afterwards.
    pub steps: i32,
    /// Promote to a queen on reaching the last row of the board. Terrain in
    /// front of the piece does not count as an edge.
    pub promotes: bool,
}

impl Advance {
    pub const PAWN: Advance = Advance {
        name: "pawn-advance",
        first_steps: 2,
        steps: 1,
        promotes: true,
    };
    pub const BERSERKER: Advance = Advance {
        name: "berserker-advance",
        first_steps: 2,
        steps: 2,
        promotes: false,
    };
}

impl Action for Advance {
    fn name(&self) -> &'static str {
        self.name
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        let length = if piece.move_count() == 0 {
            self.first_steps
        } else {
            self.steps
        };
        let forward = piece.orient_vector(dir::F);
        let hits = piece.get_line(board, dir::F, LineCast::new(length).enemy_ok(false));
        for (step, hit) in hits.iter().enumerate() {
            let at_edge = board.get_tile(hit.position + forward).is_none();
            let outcome = if self.promotes && at_edge {
                // Promotions never carry the en-passant flag.
                Outcome::promote(piece.as_ref(), piece.faction(), hit.position, PieceKind::Queen)
            } else if step == 1 {
                Outcome::move_to(piece.as_ref(), piece.faction(), hit.position)
                    .with_effect(Effect::FlagEnPassant)
            } else {
                Outcome::move_to(piece.as_ref(), piece.faction(), hit.position)
            };
            sink.add_outcome(hit.position, outcome);
        }
    }
}

/// Diagonal-forward capture.
#[derive(Debug, Clone, Copy)]
pub struct Strike;

impl Action for Strike {
    fn name(&self) -> &'static str {
        "strike"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        for direction in [dir::FL, dir::FR] {
            for hit in piece.get_line(board, direction, LineCast::new(1).can_move(false)) {
                let Some(victim) = hit.piece else { continue };
                sink.add_outcome(
                    hit.position,
                    Outcome::capture(
                        piece.as_ref(),
                        piece.faction(),
                        hit.position,
                        vec![victim.as_ref()],
                    ),
                );
            }
        }
    }
}

/// Captures an adjacent enemy that just advanced two steps by moving
/// diagonally behind it. Grants leadership.
#[derive(Debug, Clone, Copy)]
pub struct EnPassant;

impl Action for EnPassant {
    fn name(&self) -> &'static str {
        "en-passant"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        for (side, diagonal) in [(dir::L, dir::FL), (dir::R, dir::FR)] {
            let (_, _, neighbour) = piece.at_vec(board, side);
            let Some(victim) = neighbour else { continue };
            if !piece.is_enemy(victim) || !victim.en_passantable() {
                continue;
            }
            let (target, tile, occupant) = piece.at_vec(board, diagonal);
            let enterable = tile.is_some_and(|t| t.can_enter());
            if !enterable || occupant.is_some() {
                continue;
            }
            sink.add_outcome(
                target,
                Outcome::capture(piece.as_ref(), piece.faction(), target, vec![victim.as_ref()])
                    .with_leadership(EN_PASSANT_GRANT),
            );
        }
    }
}
