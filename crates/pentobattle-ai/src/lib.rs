//! Decision engine for a computer player.
//!
//! [`DecisionEngine`] is the entry point: it answers "which shape do I draft"
//! and "where do I place" for one player at one of five [`Difficulty`] tiers.
//!
//! | Tier        | Placement                                         | Draft                              |
//! |-------------|---------------------------------------------------|------------------------------------|
//! | Novice      | mostly random, else greedy opponent contact        | random                             |
//! | Elite       | greedy contact plus a light positional signal     | random or versatile                |
//! | Tactician   | beam search with one opponent reply, some jitter  | probabilistic synergy denial       |
//! | Grandmaster | wider beam, full evaluator, deterministic         | role coverage, synergy denial      |
//! | Legendary   | widest beam, self follow-up lookahead             | exhaustive small-pool search       |
//!
//! Whenever either player is down to a few shapes every tier hands over to
//! the exact [`endgame`] solver.

pub use pentobattle_engine::has_any_legal_move;

pub use self::{
    difficulty::{
        BeamParams, Difficulty, ENDGAME_THRESHOLD, GreedyParams, Lookahead, SearchProfile,
        SearchStrategy,
    },
    engine::DecisionEngine,
};

pub mod difficulty;
pub mod draft;
pub mod endgame;
mod engine;
pub mod search;
