use pentobattle_engine::{DraftSnapshot, GameSnapshot, Move, MoveCache, MoveSource, ShapeKind};
use rand::Rng;

use crate::{
    difficulty::{Difficulty, SearchProfile, SearchStrategy},
    draft,
    endgame::{is_endgame, solve_endgame},
    search::{beam, greedy},
};

/// Decision maker for one non-human player.
///
/// Stateless across calls: every call reads the snapshot it is given and
/// returns a choice without touching it. A move cache, when the profile asks
/// for one, lives for a single call.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    difficulty: Difficulty,
    profile: SearchProfile,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl DecisionEngine {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            profile: difficulty.profile(),
        }
    }

    /// Replaces the tier's default placement parameters.
    #[must_use]
    pub fn with_profile(mut self, profile: SearchProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn profile(&self) -> &SearchProfile {
        &self.profile
    }

    /// Chooses a placement for `snapshot.me()`, or `None` if there is no
    /// legal move.
    pub fn choose_placement<R>(&self, snapshot: &GameSnapshot, rng: &mut R) -> Option<Move>
    where
        R: Rng + ?Sized,
    {
        let generator = snapshot.move_generator();
        let cache = self.profile.use_move_cache.then(MoveCache::new);
        let source = match &cache {
            Some(cache) => MoveSource::cached(generator, cache),
            None => MoveSource::uncached(generator),
        };

        let profile = &self.profile;
        let choice = if is_endgame(snapshot, profile.endgame_threshold) {
            solve_endgame(snapshot, source)
        } else {
            match &profile.strategy {
                SearchStrategy::Greedy(params) => greedy::choose(
                    snapshot,
                    source,
                    params,
                    profile.jitter,
                    &profile.weights,
                    rng,
                ),
                SearchStrategy::Beam(params) => beam::choose(
                    snapshot,
                    source,
                    params,
                    profile.jitter,
                    &profile.weights,
                    rng,
                ),
            }
        };

        if let Some(cache) = &cache {
            log::debug!(
                "move cache: {} entries, {} hits, {} misses",
                cache.len(),
                cache.hits(),
                cache.misses()
            );
        }
        match &choice {
            Some(mv) => log::debug!("{} ({}) places {mv}", snapshot.me(), self.difficulty),
            None => log::debug!("{} ({}) has no legal move", snapshot.me(), self.difficulty),
        }
        choice
    }

    /// Chooses a shape to claim for `draft.me()`, or `None` if the pool is
    /// empty.
    pub fn choose_draft_pick<R>(&self, draft: &DraftSnapshot, rng: &mut R) -> Option<ShapeKind>
    where
        R: Rng + ?Sized,
    {
        draft::choose_pick(draft, self.difficulty, rng)
    }

    /// Suggested thinking delay for this tier, in milliseconds.
    pub fn think_delay_ms<R>(&self, rng: &mut R) -> u64
    where
        R: Rng + ?Sized,
    {
        self.difficulty.think_delay_ms(rng)
    }
}

#[cfg(test)]
mod tests {
    use pentobattle_engine::{Board, PlayerId};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn opening() -> GameSnapshot {
        GameSnapshot::new(
            Board::from_ascii(
                "
                ..........
                .IIIII....
                ..........
                ..........
                ....nn....
                .....nnn..
                ",
            )
            .unwrap(),
            PlayerId::One,
        )
        .with_inventory(PlayerId::One, "FLPTV".parse().unwrap())
        .with_inventory(PlayerId::Two, "UWXYZ".parse().unwrap())
        .with_placed_count(PlayerId::One, 1)
        .with_placed_count(PlayerId::Two, 1)
    }

    #[test]
    fn test_every_tier_returns_a_legal_move() {
        let snapshot = opening();
        let legal = snapshot.legal_moves(PlayerId::One);
        let mut rng = Pcg32::seed_from_u64(2024);
        for difficulty in Difficulty::ALL {
            let engine = DecisionEngine::new(difficulty);
            let mv = engine.choose_placement(&snapshot, &mut rng).unwrap();
            assert!(legal.contains(&mv), "{difficulty}: {mv}");
        }
    }

    #[test]
    fn test_legendary_is_deterministic() {
        let snapshot = opening();
        let engine = DecisionEngine::new(Difficulty::Legendary);
        let a = engine.choose_placement(&snapshot, &mut Pcg32::seed_from_u64(1));
        let b = engine.choose_placement(&snapshot, &mut Pcg32::seed_from_u64(2));
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_move_cache_is_neutral() {
        let snapshot = opening();
        for difficulty in [Difficulty::Grandmaster, Difficulty::Legendary] {
            let mut uncached_profile = difficulty.profile();
            uncached_profile.use_move_cache = false;
            let cached = DecisionEngine::new(difficulty);
            let uncached = DecisionEngine::new(difficulty).with_profile(uncached_profile);
            let mut rng = Pcg32::seed_from_u64(0);
            assert_eq!(
                cached.choose_placement(&snapshot, &mut rng),
                uncached.choose_placement(&snapshot, &mut rng),
                "{difficulty}"
            );
        }
    }

    #[test]
    fn test_endgame_overrides_every_tier() {
        let snapshot = opening().with_inventory(PlayerId::Two, "UWX".parse().unwrap());
        let source = MoveSource::uncached(snapshot.move_generator());
        let expected = solve_endgame(&snapshot, source);
        assert!(expected.is_some());
        let mut rng = Pcg32::seed_from_u64(8);
        for difficulty in Difficulty::ALL {
            let engine = DecisionEngine::new(difficulty);
            assert_eq!(engine.choose_placement(&snapshot, &mut rng), expected, "{difficulty}");
        }
    }

    #[test]
    fn test_no_legal_move_is_none() {
        let snapshot = GameSnapshot::new(
            Board::from_ascii(
                "
                XXXXX.
                ......
                ",
            )
            .unwrap(),
            PlayerId::One,
        )
        .with_inventory(PlayerId::One, "TUVWXY".parse().unwrap())
        .with_inventory(PlayerId::Two, "FILNPZ".parse().unwrap())
        .with_placed_count(PlayerId::One, 1);
        assert!(!snapshot.has_any_legal_move(PlayerId::One));
        let mut rng = Pcg32::seed_from_u64(0);
        for difficulty in Difficulty::ALL {
            let engine = DecisionEngine::new(difficulty);
            assert_eq!(engine.choose_placement(&snapshot, &mut rng), None);
        }
    }

    #[test]
    fn test_draft_pick_delegates_to_tier() {
        let draft = DraftSnapshot::full_pool(PlayerId::Two);
        let mut rng = Pcg32::seed_from_u64(4);
        for difficulty in Difficulty::ALL {
            let pick = DecisionEngine::new(difficulty)
                .choose_draft_pick(&draft, &mut rng)
                .unwrap();
            assert!(draft.pool().contains(pick));
        }
        let empty = DraftSnapshot::new(pentobattle_engine::Inventory::default(), PlayerId::One);
        assert_eq!(DecisionEngine::default().choose_draft_pick(&empty, &mut rng), None);
    }
}
