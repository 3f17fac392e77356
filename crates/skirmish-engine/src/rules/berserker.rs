use super::FRENZY_COST;
use crate::outcome::Effect;
use crate::piece::LineCast;
use crate::{Action, Board, Outcome, OutcomeSink, Piece};
use skirmish_core::dir;

/// Cuts through two pieces on a forward diagonal and dies doing it.
///
/// Offered on the second victim's tile; costs leadership.
#[derive(Debug, Clone, Copy)]
pub struct Frenzy;

impl Action for Frenzy {
    fn name(&self) -> &'static str {
        "frenzy"
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        let cast = LineCast::new(1).can_move(false);
        for direction in [dir::FL, dir::FR] {
            for first in piece.get_line(board, direction, cast) {
                let Some(near) = first.piece else { continue };
                for second in piece.get_line(board, direction, cast.start(first.position)) {
                    let Some(far) = second.piece else { continue };
                    let outcome = Outcome::capture(
                        piece.as_ref(),
                        piece.faction(),
                        second.position,
                        vec![near.as_ref(), far.as_ref()],
                    )
                    .with_leadership(-FRENZY_COST)
                    .with_effect(Effect::SelfDestruct);
                    sink.add_outcome(second.position, outcome);
                }
            }
        }
    }
}
