use super::SUMMON_COST;
use crate::piece::LineCast;
use crate::{Action, Board, Outcome, OutcomeSink, Piece};
use skirmish_core::{dir, PieceKind};

/// Raises a zombie on an empty tile beside the summoner.
///
/// The zombie is requested for the summoner's automated counterpart; when that
/// faction does not take turns on the board it joins the summoner's own.
#[derive(Debug, Clone, Copy)]
pub struct Summon;

impl Action for Summon {
    fn name(&self) -> &'static str {
        "summon"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        for side in [dir::L, dir::R] {
            let (target, tile, occupant) = piece.at_vec(board, side);
            let Some(tile) = tile else { continue };
            if !tile.can_enter() || occupant.is_some() {
                continue;
            }
            sink.add_outcome(
                target,
                Outcome::summon(
                    piece.as_ref(),
                    piece.faction(),
                    target,
                    PieceKind::Zombie,
                    piece.faction().automated(),
                )
                .with_leadership(-SUMMON_COST),
            );
        }
    }
}

/// A zombie's single forward step, trampling whatever stands there.
#[derive(Debug, Clone, Copy)]
pub struct Shamble;

impl Action for Shamble {
    fn name(&self) -> &'static str {
        "shamble"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        let cast = LineCast::new(1).ally_ok(true);
        for hit in piece.get_line(board, dir::F, cast) {
            let outcome = match hit.piece {
                None => Outcome::move_to(piece.as_ref(), piece.faction(), hit.position),
                Some(victim) => Outcome::capture(
                    piece.as_ref(),
                    piece.faction(),
                    hit.position,
                    vec![victim.as_ref()],
                ),
            };
            sink.add_outcome(hit.position, outcome);
        }
    }
}
