//! Sentry stealth: lurk in place, then ambush along cardinal lines.

use super::AMBUSH_RANGE;
use crate::outcome::Effect;
use crate::piece::LineCast;
use crate::{Action, Board, Outcome, OutcomeSink, Piece};
use skirmish_core::dir;

/// Captures the first enemy on a cardinal line while lurking.
///
/// The ambush ends the lurk but not the turn.
#[derive(Debug, Clone, Copy)]
pub struct Ambush;

impl Action for Ambush {
    fn name(&self) -> &'static str {
        "ambush"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        if !piece.is_lurking() {
            return;
        }
        let cast = LineCast::new(AMBUSH_RANGE).can_move(false);
        for direction in dir::CARDINAL {
            for hit in piece.get_line(board, direction, cast) {
                let Some(victim) = hit.piece else { continue };
                let outcome = Outcome::capture(
                    piece.as_ref(),
                    piece.faction(),
                    hit.position,
                    vec![victim.as_ref()],
                )
                .with_effect(Effect::DisableLurk)
                .keep_turn();
                sink.add_outcome(hit.position, outcome);
            }
        }
    }
}

/// Stays put and starts lurking.
#[derive(Debug, Clone, Copy)]
pub struct Lurk;

impl Action for Lurk {
    fn name(&self) -> &'static str {
        "lurk"
    }

    fn update(&self, piece: &Piece, _board: &Board, sink: &mut OutcomeSink) {
        if piece.is_lurking() {
            return;
        }
        let here = piece.position();
        sink.add_outcome(
            here,
            Outcome::move_to(piece.as_ref(), piece.faction(), here).with_effect(Effect::EnableLurk),
        );
    }
}
