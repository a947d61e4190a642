//! Rules layer for two-player pentomino battles.
//!
//! The crate owns everything both players agree on: the twelve shapes and their
//! orientations, the board and its empty regions, the inventories, and the
//! generator that enumerates legal placements. It carries no notion of skill or
//! strategy.

pub use self::{core::*, movegen::*, snapshot::*};

pub mod core;
pub mod movegen;
pub mod snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown shape letter '{_0}'")]
pub struct UnknownShapeError(#[error(not(source))] pub char);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid player number {_0}, expected 1 or 2")]
pub struct InvalidPlayerError(#[error(not(source))] pub u8);
