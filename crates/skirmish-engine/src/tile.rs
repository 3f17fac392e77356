//! A single board cell.

use crate::Piece;
use skirmish_core::{Position, TileKind};
use tracing::info;

/// A board cell: terrain plus at most one occupant.
///
/// The tile owns its occupant, so a piece can only ever be in one place.
/// Whoever puts a piece on a tile is responsible for having updated the
/// piece's position first.
#[derive(Debug, Clone)]
pub struct Tile {
    position: Position,
    kind: TileKind,
    piece: Option<Piece>,
}

impl Tile {
    /// Creates an empty tile of the given kind.
    pub fn new(position: Position, kind: TileKind) -> Self {
        Tile {
            position,
            kind,
            piece: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Returns the occupant, if any.
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.kind.is_blocked()
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.kind.is_void()
    }

    #[inline]
    pub fn is_deadly(&self) -> bool {
        self.kind.is_deadly()
    }

    /// Returns true if a piece may move onto this tile.
    #[inline]
    pub fn can_enter(&self) -> bool {
        self.kind.can_enter()
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    /// Removes and returns the occupant.
    pub(crate) fn take_piece(&mut self) -> Option<Piece> {
        self.piece.take()
    }

    /// Puts a piece on this tile, returning the previous occupant.
    pub(crate) fn put_piece(&mut self, piece: Piece) -> Option<Piece> {
        debug_assert_eq!(piece.position(), self.position);
        self.piece.replace(piece)
    }

    /// Applies the standing hazard of this tile, returning any evicted occupant.
    pub(crate) fn update(&mut self) -> Option<Piece> {
        if !self.kind.evicts_occupant() {
            return None;
        }
        let piece = self.piece.take()?;
        match self.kind {
            TileKind::Wall => info!(piece = %piece, at = %self.position, "crushed by a wall"),
            TileKind::Chasm => info!(piece = %piece, at = %self.position, "fell into a chasm"),
            _ => info!(piece = %piece, at = %self.position, "lost to the void"),
        }
        Some(piece)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.piece {
            Some(piece) => write!(f, "{} {} with {}", self.kind, self.position, piece),
            None => write!(f, "{} {}", self.kind, self.position),
        }
    }
}
