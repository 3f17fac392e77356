//! The contract between the board and whoever picks outcomes.

use crate::{Board, Outcome};
use skirmish_core::{Faction, Position};

/// One playable choice: an outcome offered on a target tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub target: Position,
    pub outcome: Outcome,
}

/// An automated player for one faction.
pub trait Bot {
    /// The faction this bot plays.
    fn faction(&self) -> Faction;

    /// Strategy name used in logs and game records.
    fn name(&self) -> &str;

    /// Picks one of the board's current outcomes for this bot's faction, or
    /// `None` to pass.
    fn play(&mut self, board: &Board) -> Option<Decision>;
}

/// Every outcome `faction` can play right now, piece by piece in board order,
/// then by target.
pub fn legal_decisions(board: &Board, faction: Faction) -> Vec<Decision> {
    board
        .loyal_pieces(faction)
        .flat_map(|piece| piece.outcomes().iter())
        .map(|(target, outcome)| Decision {
            target: *target,
            outcome: outcome.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_has_twenty_decisions() {
        let board = Board::standard().unwrap();
        let decisions = legal_decisions(&board, Faction::White);
        // 16 pawn advances plus 4 knight leaps.
        assert_eq!(decisions.len(), 20);
        assert!(decisions.iter().all(|d| d.outcome.faction() == Faction::White));
        assert!(decisions.iter().all(|d| d.target == d.outcome.target()));
    }

    #[test]
    fn decisions_are_realizable() {
        let board = Board::standard().unwrap();
        for decision in legal_decisions(&board, Faction::White) {
            let mut copy = board.clone();
            copy.realize(&decision.outcome).unwrap();
        }
    }
}
