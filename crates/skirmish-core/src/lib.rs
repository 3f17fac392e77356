//! Core types for skirmish.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Faction`] for the sides taking turns
//! - [`PieceKind`] and [`TileKind`] for board contents
//! - [`Position`], [`Vector`] and the [`dir`] helpers for board geometry
//! - [`StateSnapshot`] for loading and saving board states

pub mod dir;
mod faction;
mod geometry;
mod piece_kind;
mod snapshot;
mod tile_kind;

pub use faction::Faction;
pub use geometry::{GeometryError, Position, Vector};
pub use piece_kind::PieceKind;
pub use snapshot::{SnapshotError, StateSnapshot};
pub use tile_kind::TileKind;
