//! JSON export of finished games.
//!
//! The file holds the game record (bots, decisions, end reason and final
//! snapshot) together with the seed it was played with, so a game can be
//! replayed from the file alone.

use crate::game_runner::GameRecord;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct GameJson<'a> {
    seed: u64,
    #[serde(flatten)]
    record: &'a GameRecord,
}

/// Writes a finished game to `path` as pretty-printed JSON.
///
/// # File Format
///
/// ```json
/// {
///   "seed": 7,
///   "bots": [["White", "aggro"], ["Black", "random"]],
///   "moves": [
///     {
///       "turn": 0,
///       "faction": "White",
///       "bot": "aggro",
///       "kind": "move",
///       "from": [4, 6],
///       "to": [4, 4],
///       "description": "White move (4, 6) -> (4, 4)"
///     }
///   ],
///   "end": { "reason": "turn_limit", "limit": 1 },
///   "turns": 1,
///   "final_state": { "tiles": [[1, 1]], "...": "..." }
/// }
/// ```
pub fn write_json<P: AsRef<Path>>(path: P, seed: u64, record: &GameRecord) -> std::io::Result<()> {
    let json = GameJson { seed, record };
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &json)?;
    Ok(())
}
