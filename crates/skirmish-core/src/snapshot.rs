//! Board state snapshots.
//!
//! A [`StateSnapshot`] is the plain-data form of a board: same-shaped grids of
//! tile, piece and faction codes plus the turn bookkeeping. The engine is
//! responsible for turning a validated snapshot into live tiles and pieces.

use crate::{Faction, PieceKind, Position, TileKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when validating or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot has an empty tile grid")]
    EmptyGrid,

    #[error("{layer} row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        layer: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{layer} grid has {found} rows, expected {expected}")]
    ShapeMismatch {
        layer: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile code {code} at {position}")]
    UnknownTileKind { code: i32, position: Position },

    #[error("unknown piece code {code} at {position}")]
    UnknownPieceKind { code: i32, position: Position },

    #[error("unknown faction code {0}")]
    UnknownFaction(i32),

    #[error("piece at {0} has no faction")]
    PieceWithoutFaction(Position),

    #[error("faction {0} is not in the turn order")]
    FactionNotInTurnOrder(Faction),

    #[error("turn order is empty")]
    EmptyTurnOrder,

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Plain-data board state.
///
/// All grids are row-major: `grid[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Tile codes (see [`TileKind::code`]).
    pub tiles: Vec<Vec<i32>>,
    /// Piece codes (see [`PieceKind::code`]), 0 for an empty tile.
    pub pieces: Vec<Vec<i32>>,
    /// Faction codes of the pieces (see [`Faction::code`]), 0 for an empty tile.
    pub factions: Vec<Vec<i32>>,
    /// Faction codes in the order they take turns.
    pub turn_order: Vec<i32>,
    /// Number of turns taken or skipped so far.
    #[serde(default)]
    pub turn: u32,
    /// Leadership points keyed by faction code.
    #[serde(default)]
    pub leadership: BTreeMap<i32, i32>,
}

impl StateSnapshot {
    /// Creates a snapshot of an empty `width` x `height` board of default tiles.
    ///
    /// Every faction in `turn_order` starts with `leadership` points.
    pub fn empty(width: usize, height: usize, turn_order: &[Faction], leadership: i32) -> Self {
        StateSnapshot {
            tiles: vec![vec![TileKind::Default.code() as i32; width]; height],
            pieces: vec![vec![0; width]; height],
            factions: vec![vec![0; width]; height],
            turn_order: turn_order.iter().map(|f| f.code() as i32).collect(),
            turn: 0,
            leadership: turn_order
                .iter()
                .map(|f| (f.code() as i32, leadership))
                .collect(),
        }
    }

    /// The standard 8x8 setup: Black on rows 0-1, White on rows 6-7,
    /// White to move, 3 leadership each.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut snapshot = Self::empty(8, 8, &[Faction::White, Faction::Black], 3);
        for (x, kind) in BACK_RANK.iter().enumerate() {
            let x = x as i32;
            snapshot.set_piece(Position::new(x, 0), *kind, Faction::Black);
            snapshot.set_piece(Position::new(x, 1), PieceKind::Pawn, Faction::Black);
            snapshot.set_piece(Position::new(x, 6), PieceKind::Pawn, Faction::White);
            snapshot.set_piece(Position::new(x, 7), *kind, Faction::White);
        }
        snapshot
    }

    /// Places a piece. Out-of-range positions are ignored.
    pub fn set_piece(&mut self, position: Position, kind: PieceKind, faction: Faction) {
        if let Some((x, y)) = self.index(position) {
            self.pieces[y][x] = kind.code() as i32;
            self.factions[y][x] = faction.code() as i32;
        }
    }

    /// Builder form of [`set_piece`](Self::set_piece).
    pub fn with_piece(mut self, position: Position, kind: PieceKind, faction: Faction) -> Self {
        self.set_piece(position, kind, faction);
        self
    }

    /// Sets a tile's kind. Out-of-range positions are ignored.
    pub fn set_tile(&mut self, position: Position, kind: TileKind) {
        if let Some((x, y)) = self.index(position) {
            self.tiles[y][x] = kind.code() as i32;
        }
    }

    /// Builder form of [`set_tile`](Self::set_tile).
    pub fn with_tile(mut self, position: Position, kind: TileKind) -> Self {
        self.set_tile(position, kind);
        self
    }

    /// Board width (columns).
    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    /// Board height (rows).
    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    /// Checks grid shapes and decodes every code once.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let height = self.height();
        let width = self.width();
        if height == 0 || width == 0 {
            return Err(SnapshotError::EmptyGrid);
        }

        for (layer, grid) in [
            ("tiles", &self.tiles),
            ("pieces", &self.pieces),
            ("factions", &self.factions),
        ] {
            if grid.len() != height {
                return Err(SnapshotError::ShapeMismatch {
                    layer,
                    expected: height,
                    found: grid.len(),
                });
            }
            for (row, cells) in grid.iter().enumerate() {
                if cells.len() != width {
                    return Err(SnapshotError::RaggedRow {
                        layer,
                        row,
                        expected: width,
                        found: cells.len(),
                    });
                }
            }
        }

        let turn_order = self.decoded_turn_order()?;

        for y in 0..height {
            for x in 0..width {
                let position = Position::new(x as i32, y as i32);
                let tile = self.tiles[y][x];
                if TileKind::from_code(tile as i64).is_none() {
                    return Err(SnapshotError::UnknownTileKind {
                        code: tile,
                        position,
                    });
                }
                if let Some((_, faction)) = self.decode_piece(x, y)? {
                    if !turn_order.contains(&faction) {
                        return Err(SnapshotError::FactionNotInTurnOrder(faction));
                    }
                }
            }
        }

        for code in self.leadership.keys() {
            let faction = Faction::from_code(*code as i64)
                .ok_or(SnapshotError::UnknownFaction(*code))?;
            if !turn_order.contains(&faction) {
                return Err(SnapshotError::FactionNotInTurnOrder(faction));
            }
        }

        Ok(())
    }

    /// Returns the decoded turn order.
    pub fn decoded_turn_order(&self) -> Result<Vec<Faction>, SnapshotError> {
        if self.turn_order.is_empty() {
            return Err(SnapshotError::EmptyTurnOrder);
        }
        self.turn_order
            .iter()
            .map(|code| Faction::from_code(*code as i64).ok_or(SnapshotError::UnknownFaction(*code)))
            .collect()
    }

    /// Returns the tile kind at `(x, y)`, if the cell exists and its code is known.
    pub fn tile_at(&self, x: usize, y: usize) -> Option<TileKind> {
        let code = *self.tiles.get(y)?.get(x)?;
        TileKind::from_code(code as i64)
    }

    /// Decodes the piece at `(x, y)`; `Ok(None)` for an empty cell.
    pub fn decode_piece(&self, x: usize, y: usize) -> Result<Option<(PieceKind, Faction)>, SnapshotError> {
        let position = Position::new(x as i32, y as i32);
        let code = self
            .pieces
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0);
        if code == 0 {
            return Ok(None);
        }
        let kind = PieceKind::from_code(code as i64)
            .ok_or(SnapshotError::UnknownPieceKind { code, position })?;
        let faction_code = self
            .factions
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0);
        if faction_code == 0 {
            return Err(SnapshotError::PieceWithoutFaction(position));
        }
        let faction = Faction::from_code(faction_code as i64)
            .ok_or(SnapshotError::UnknownFaction(faction_code))?;
        Ok(Some((kind, faction)))
    }

    /// Parses a snapshot from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: StateSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn index(&self, position: Position) -> Option<(usize, usize)> {
        if position.in_bounds(self.width(), self.height()) {
            Some((position.x as usize, position.y as usize))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_setup_is_valid() {
        let snapshot = StateSnapshot::standard();
        snapshot.validate().unwrap();
        assert_eq!(snapshot.width(), 8);
        assert_eq!(snapshot.height(), 8);
        assert_eq!(
            snapshot.decode_piece(4, 7).unwrap(),
            Some((PieceKind::King, Faction::White))
        );
        assert_eq!(
            snapshot.decode_piece(3, 0).unwrap(),
            Some((PieceKind::Queen, Faction::Black))
        );
        assert_eq!(snapshot.decode_piece(4, 4).unwrap(), None);
    }

    #[test]
    fn json_roundtrip() {
        let snapshot = StateSnapshot::standard().with_tile(Position::new(3, 3), TileKind::Chasm);
        let json = snapshot.to_json().unwrap();
        let parsed = StateSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn leadership_keys_parse_from_strings() {
        let json = r#"{
            "tiles": [[0, 0], [0, 0]],
            "pieces": [[6, 0], [0, 6]],
            "factions": [[2, 0], [0, 1]],
            "turn_order": [1, 2],
            "turn": 3,
            "leadership": {"1": 4, "2": 0}
        }"#;
        let snapshot = StateSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.turn, 3);
        assert_eq!(snapshot.leadership.get(&1), Some(&4));
        assert_eq!(snapshot.leadership.get(&2), Some(&0));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut snapshot = StateSnapshot::empty(3, 2, &[Faction::White], 0);
        snapshot.pieces[1].pop();
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::RaggedRow { layer: "pieces", row: 1, .. })
        ));
    }

    #[test]
    fn mismatched_layers_are_rejected() {
        let mut snapshot = StateSnapshot::empty(3, 2, &[Faction::White], 0);
        snapshot.factions.pop();
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::ShapeMismatch { layer: "factions", .. })
        ));
    }

    #[test]
    fn piece_faction_must_take_turns() {
        let snapshot = StateSnapshot::empty(2, 2, &[Faction::White], 0).with_piece(
            Position::new(0, 0),
            PieceKind::Pawn,
            Faction::Black,
        );
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::FactionNotInTurnOrder(Faction::Black))
        ));
    }

    #[test]
    fn piece_without_faction_is_rejected() {
        let mut snapshot = StateSnapshot::empty(2, 2, &[Faction::White], 0);
        snapshot.pieces[0][1] = PieceKind::Rook.code() as i32;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::PieceWithoutFaction(p)) if p == Position::new(1, 0)
        ));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let mut snapshot = StateSnapshot::empty(2, 2, &[Faction::White], 0);
        snapshot.tiles[0][0] = 9;
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnknownTileKind { code: 9, .. })
        ));

        let mut snapshot = StateSnapshot::empty(2, 2, &[Faction::White], 0);
        snapshot.turn_order.push(7);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnknownFaction(7))
        ));
    }

    #[test]
    fn empty_turn_order_is_rejected() {
        let snapshot = StateSnapshot::empty(2, 2, &[], 0);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::EmptyTurnOrder)
        ));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::select;

        fn placements() -> impl Strategy<Value = Vec<(i32, i32, PieceKind, Faction)>> {
            prop::collection::vec(
                (
                    0..6i32,
                    0..5i32,
                    select(PieceKind::ALL.to_vec()),
                    select(vec![Faction::White, Faction::Black]),
                ),
                0..12,
            )
        }

        proptest! {
            #[test]
            fn arbitrary_boards_roundtrip_through_json(
                pieces in placements(),
                terrain in prop::collection::vec((0..6i32, 0..5i32, select(TileKind::ALL.to_vec())), 0..8),
                turn in 0..100u32,
            ) {
                let mut snapshot = StateSnapshot::empty(6, 5, &[Faction::White, Faction::Black], 2);
                snapshot.turn = turn;
                for (x, y, kind) in terrain {
                    snapshot.set_tile(Position::new(x, y), kind);
                }
                for (x, y, kind, faction) in pieces {
                    snapshot.set_piece(Position::new(x, y), kind, faction);
                }
                prop_assert!(snapshot.validate().is_ok());

                let parsed = StateSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
                prop_assert_eq!(parsed, snapshot);
            }
        }
    }
}
