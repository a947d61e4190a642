use std::ops::Range;

use pentobattle_evaluator::weights::WeightSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Playing strength, weakest first.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Novice,
    Elite,
    Tactician,
    Grandmaster,
    #[default]
    Legendary,
}

impl Difficulty {
    pub const ALL: [Self; 5] = [
        Self::Novice,
        Self::Elite,
        Self::Tactician,
        Self::Grandmaster,
        Self::Legendary,
    ];

    /// Tier number, `1` (novice) to `5` (legendary).
    #[must_use]
    pub const fn tier(self) -> u8 {
        match self {
            Self::Novice => 1,
            Self::Elite => 2,
            Self::Tactician => 3,
            Self::Grandmaster => 4,
            Self::Legendary => 5,
        }
    }

    #[must_use]
    pub const fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(Self::Novice),
            2 => Some(Self::Elite),
            3 => Some(Self::Tactician),
            4 => Some(Self::Grandmaster),
            5 => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Parses a tier number or name, falling back to the strongest tier.
    ///
    /// `"dumbie"` is accepted as another name for the novice tier.
    #[must_use]
    pub fn parse_or_strongest(s: &str) -> Self {
        let s = s.trim();
        if let Some(difficulty) = s.parse::<u8>().ok().and_then(Self::from_tier) {
            return difficulty;
        }
        if s.eq_ignore_ascii_case("dumbie") {
            return Self::Novice;
        }
        s.parse().unwrap_or_else(|_| {
            log::warn!("unknown difficulty '{s}', using {}", Self::Legendary);
            Self::Legendary
        })
    }

    /// Suggested artificial thinking delay in milliseconds.
    ///
    /// The engine never sleeps; applying the delay is up to the caller.
    #[must_use]
    pub const fn think_delay_ms_range(self) -> Range<u64> {
        match self {
            Self::Novice => 900..1800,
            Self::Elite => 550..1150,
            Self::Tactician => 700..1200,
            Self::Grandmaster => 900..1500,
            Self::Legendary => 1100..1500,
        }
    }

    pub fn think_delay_ms<R>(self, rng: &mut R) -> u64
    where
        R: Rng + ?Sized,
    {
        rng.random_range(self.think_delay_ms_range())
    }

    /// Default search parameters for this tier.
    #[must_use]
    pub fn profile(self) -> SearchProfile {
        match self {
            Self::Novice => SearchProfile {
                strategy: SearchStrategy::Greedy(GreedyParams {
                    random_move_chance: 0.8,
                    own_contact: 0.0,
                    opponent_contact: 1.0,
                    interior: 0.0,
                }),
                jitter: 2.0,
                weights: WeightSet::ZERO,
                use_move_cache: false,
                endgame_threshold: ENDGAME_THRESHOLD,
            },
            Self::Elite => SearchProfile {
                strategy: SearchStrategy::Greedy(GreedyParams {
                    random_move_chance: 0.0,
                    own_contact: 2.0,
                    opponent_contact: 0.8,
                    interior: 0.15,
                }),
                jitter: 0.5,
                weights: WeightSet::ELITE,
                use_move_cache: false,
                endgame_threshold: ENDGAME_THRESHOLD,
            },
            Self::Tactician => SearchProfile {
                strategy: SearchStrategy::Beam(BeamParams {
                    beam_width: 10,
                    reply_beam_width: 6,
                    lookahead: Lookahead::OpponentReply,
                    lookahead_weight: 0.5,
                }),
                jitter: 0.1,
                weights: WeightSet::TACTICIAN,
                use_move_cache: true,
                endgame_threshold: ENDGAME_THRESHOLD,
            },
            Self::Grandmaster => SearchProfile {
                strategy: SearchStrategy::Beam(BeamParams {
                    beam_width: 18,
                    reply_beam_width: 10,
                    lookahead: Lookahead::OpponentReply,
                    lookahead_weight: 0.8,
                }),
                jitter: 0.0,
                weights: WeightSet::GRANDMASTER,
                use_move_cache: true,
                endgame_threshold: ENDGAME_THRESHOLD,
            },
            Self::Legendary => SearchProfile {
                strategy: SearchStrategy::Beam(BeamParams {
                    beam_width: 26,
                    reply_beam_width: 8,
                    lookahead: Lookahead::SelfFollowUp,
                    lookahead_weight: 6.0,
                }),
                jitter: 0.0,
                weights: WeightSet::LEGENDARY,
                use_move_cache: true,
                endgame_threshold: ENDGAME_THRESHOLD,
            },
        }
    }
}

/// Remaining-shape count at or below which the endgame solver takes over.
pub const ENDGAME_THRESHOLD: usize = 4;

/// Tunable parameters of the placement search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub strategy: SearchStrategy,
    /// Upper bound of the uniform noise added to each pre-score; `0` is
    /// deterministic.
    #[serde(default)]
    pub jitter: f32,
    #[serde(default)]
    pub weights: WeightSet,
    #[serde(default)]
    pub use_move_cache: bool,
    #[serde(default = "default_endgame_threshold")]
    pub endgame_threshold: usize,
}

fn default_endgame_threshold() -> usize {
    ENDGAME_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStrategy {
    Greedy(GreedyParams),
    Beam(BeamParams),
}

/// Single ply: contact terms on the current board plus the weighted
/// evaluator, sometimes replaced by a uniformly random move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreedyParams {
    /// Probability of skipping evaluation and playing a random legal move.
    pub random_move_chance: f64,
    /// Per neighbor already owned by the mover.
    pub own_contact: f32,
    /// Per neighbor owned by the opponent.
    pub opponent_contact: f32,
    /// Per cell away from the board edge.
    pub interior: f32,
}

/// Beam-pruned minimax over the quick territory estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParams {
    pub beam_width: usize,
    pub reply_beam_width: usize,
    pub lookahead: Lookahead,
    pub lookahead_weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookahead {
    None,
    /// Worst opponent reply by the quick estimate.
    OpponentReply,
    /// Worst opponent reply, judged by self's best follow-up afterwards.
    SelfFollowUp,
}
