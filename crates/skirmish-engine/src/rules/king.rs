//! Castling.

use crate::piece::LineCast;
use crate::{Action, Board, Outcome, OutcomeSink, Piece};
use skirmish_core::{dir, PieceKind};

/// Swaps an unmoved leader past an unmoved allied rook on a clear cardinal
/// line. The rook must stand at least three cells away.
#[derive(Debug, Clone, Copy)]
pub struct Castle;

impl Action for Castle {
    fn name(&self) -> &'static str {
        "castle"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        if piece.move_count() > 0 {
            return;
        }
        let cast = LineCast::new(board.extent())
            .can_move(false)
            .enemy_ok(false)
            .ally_ok(true);
        for direction in dir::CARDINAL {
            let hits = piece.get_line(board, direction, cast);
            let Some(rook) = hits.first().and_then(|hit| hit.piece) else {
                continue;
            };
            if rook.kind() != PieceKind::Rook || rook.move_count() > 0 {
                continue;
            }
            if (rook.position() - piece.position()).chebyshev_len() < 3 {
                continue;
            }
            let outcome = Outcome::castle(piece.as_ref(), rook.as_ref(), piece.faction());
            sink.add_outcome(outcome.target(), outcome);
        }
    }
}
