use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use skirmish_core::Faction;
use skirmish_engine::{legal_decisions, Board, Bot, Decision};
use tracing::debug;

/// Plays a uniformly random decision.
#[derive(Debug, Clone)]
pub struct RandomBot {
    faction: Faction,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(faction: Faction, seed: u64) -> Self {
        RandomBot {
            faction,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn faction(&self) -> Faction {
        self.faction
    }

    fn name(&self) -> &str {
        "random"
    }

    fn play(&mut self, board: &Board) -> Option<Decision> {
        let decisions = legal_decisions(board, self.faction);
        let decision = decisions.choose(&mut self.rng).cloned();
        if decision.is_none() {
            debug!(faction = %self.faction, "random bot has nothing to play");
        }
        decision
    }
}
