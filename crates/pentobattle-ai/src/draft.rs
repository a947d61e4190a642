//! Draft phase: choosing which shape to claim from the shared pool.
//!
//! No board is involved. Picks are driven by fixed per-shape tables:
//!
//! | shape | value | role     | versatile | tricky |
//! |-------|-------|----------|-----------|--------|
//! | F     | 2     | blocker  |           | yes    |
//! | I     | 5     | linear   | yes       |        |
//! | L     | 5     | flexible | yes       |        |
//! | N     | 4     | flexible | yes       |        |
//! | P     | 3     | flexible | yes       |        |
//! | T     | 4     | flexible | yes       |        |
//! | U     | 2     | blocker  |           | yes    |
//! | V     | 2     |          |           | yes    |
//! | W     | 3     | blocker  |           | yes    |
//! | X     | 1     | blocker  |           | yes    |
//! | Y     | 5     | flexible | yes       |        |
//! | Z     | 4     | filler   | yes       |        |
//!
//! Blockers are also the shapes that pair badly with anything else.

use pentobattle_engine::{DraftSnapshot, Inventory, PlayerId, ShapeKind};
use rand::{Rng, seq::IndexedRandom as _};

use crate::{difficulty::Difficulty, search::first_max};

/// Pool size at or below which the legendary tier searches every pick order.
pub const SMALL_POOL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum ShapeRole {
    Flexible,
    Linear,
    Filler,
    Blocker,
}

impl ShapeRole {
    #[must_use]
    pub const fn of(shape: ShapeKind) -> Option<Self> {
        use ShapeKind as S;
        match shape {
            S::L | S::N | S::P | S::T | S::Y => Some(Self::Flexible),
            S::I => Some(Self::Linear),
            S::Z => Some(Self::Filler),
            S::F | S::U | S::W | S::X => Some(Self::Blocker),
            S::V => None,
        }
    }
}

#[must_use]
pub const fn shape_value(shape: ShapeKind) -> f32 {
    use ShapeKind as S;
    match shape {
        S::I | S::L | S::Y => 5.0,
        S::N | S::T | S::Z => 4.0,
        S::P | S::W => 3.0,
        S::F | S::U | S::V => 2.0,
        S::X => 1.0,
    }
}

#[must_use]
pub const fn is_blocker(shape: ShapeKind) -> bool {
    matches!(ShapeRole::of(shape), Some(ShapeRole::Blocker))
}

#[must_use]
pub const fn is_versatile(shape: ShapeKind) -> bool {
    use ShapeKind as S;
    matches!(shape, S::I | S::L | S::N | S::P | S::T | S::Y | S::Z)
}

#[must_use]
pub const fn is_tricky(shape: ShapeKind) -> bool {
    use ShapeKind as S;
    matches!(shape, S::F | S::U | S::V | S::W | S::X)
}

/// Shapes that combine well with `shape`.
#[must_use]
pub const fn synergy_partners(shape: ShapeKind) -> &'static [ShapeKind] {
    use ShapeKind as S;
    match shape {
        S::P => &[S::Z, S::L, S::N],
        S::Z => &[S::P],
        S::L => &[S::P, S::N],
        S::N => &[S::P, S::L],
        S::I => &[S::I, S::L, S::Y, S::N, S::Z],
        S::T => &[S::Y],
        S::Y => &[S::T, S::N],
        S::F | S::U | S::V | S::W | S::X => &[],
    }
}

/// Pool shapes that partner a shape in `picks`, each listed once, in order of
/// the picks and then of their partners.
#[must_use]
pub fn synergy_targets(picks: &Inventory, pool: &Inventory) -> Vec<ShapeKind> {
    let mut targets = Vec::new();
    for &held in picks.shapes() {
        for &partner in synergy_partners(held) {
            if pool.contains(partner) && !targets.contains(&partner) {
                targets.push(partner);
            }
        }
    }
    targets
}

/// How much `shape` rounds out `picks`.
///
/// `2 × value`, `+4` for the first flexible shape, `+5` for the first linear
/// shape, `+3` for the first filler, `-6` for a third blocker and `-3` for any
/// blocker while fewer than three shapes are held.
#[must_use]
pub fn role_coverage_score(shape: ShapeKind, picks: &Inventory) -> f32 {
    let held = |role: ShapeRole| picks.shapes().iter().any(|&s| ShapeRole::of(s) == Some(role));
    let mut score = shape_value(shape) * 2.0;
    match ShapeRole::of(shape) {
        Some(ShapeRole::Flexible) if !held(ShapeRole::Flexible) => score += 4.0,
        Some(ShapeRole::Linear) if !held(ShapeRole::Linear) => score += 5.0,
        Some(ShapeRole::Filler) if !held(ShapeRole::Filler) => score += 3.0,
        Some(ShapeRole::Blocker) => {
            let blockers = picks.shapes().iter().filter(|&&s| is_blocker(s)).count();
            if blockers >= 2 {
                score -= 6.0;
            }
            if picks.len() < 3 {
                score -= 3.0;
            }
        }
        _ => {}
    }
    score
}

/// Sum over `shapes` of `value - 1.5` for blockers, `value` otherwise.
#[must_use]
pub fn kit_quality(shapes: impl IntoIterator<Item = ShapeKind>) -> f32 {
    shapes
        .into_iter()
        .map(|s| shape_value(s) - if is_blocker(s) { 1.5 } else { 0.0 })
        .sum()
}

/// Value of taking `shape` away from an opponent who could combo it, scaled
/// by how much it helps the taker's own `picks`.
#[must_use]
pub fn denial_score(shape: ShapeKind, picks: &Inventory) -> f32 {
    let mut score = shape_value(shape) * 2.0 + 0.5 * role_coverage_score(shape, picks);
    if is_blocker(shape) {
        score -= 5.0;
    }
    score
}

/// General value of `shape` against an opponent holding `opponent_picks`.
#[must_use]
pub fn counter_score(shape: ShapeKind, opponent_picks: &Inventory) -> f32 {
    use ShapeKind as S;
    let holds_any = |set: &[ShapeKind]| opponent_picks.shapes().iter().any(|s| set.contains(s));
    let holds_long = holds_any(&[S::I, S::L, S::Y, S::N]);
    let holds_branchy = holds_any(&[S::T, S::F, S::Y, S::X]);

    let mut score = shape_value(shape) * 2.0;
    if is_blocker(shape) {
        score -= 4.0;
    }
    if holds_long && matches!(shape, S::T | S::F | S::X | S::W | S::U) {
        score += 1.0;
    }
    if holds_branchy && matches!(shape, S::I | S::L | S::P) {
        score += 2.5;
    }
    if is_versatile(shape) {
        score += 2.5;
    }
    score
}

/// Exhaustive alternating-pick search over the rest of the pool.
///
/// The leaf value is `kit_quality(own picks) - 0.8 × kit_quality(opponent
/// picks)`; self maximizes and the opponent minimizes. Returns `None` for an
/// empty pool.
#[must_use]
pub fn small_pool_pick(draft: &DraftSnapshot) -> Option<ShapeKind> {
    let me = draft.me();
    let best = first_max(draft.pool().distinct().filter_map(|shape| {
        let next = draft.after_pick(me, shape)?;
        Some((pick_order_value(&next, me.opponent()), shape))
    }));
    best.map(|(_, shape)| shape)
}

fn pick_order_value(draft: &DraftSnapshot, to_move: PlayerId) -> f32 {
    let me = draft.me();
    if draft.pool().is_empty() {
        return kit_quality(draft.picks(me).shapes().iter().copied())
            - 0.8 * kit_quality(draft.picks(me.opponent()).shapes().iter().copied());
    }
    let values = draft
        .pool()
        .distinct()
        .filter_map(|shape| draft.after_pick(to_move, shape))
        .map(|next| pick_order_value(&next, to_move.opponent()));
    if to_move == me {
        values.fold(f32::NEG_INFINITY, f32::max)
    } else {
        values.fold(f32::INFINITY, f32::min)
    }
}

fn random_from<R>(shapes: &[ShapeKind], rng: &mut R) -> Option<ShapeKind>
where
    R: Rng + ?Sized,
{
    shapes.choose(rng).copied()
}

/// Picks a shape for `draft.me()` the way `difficulty` plays.
pub fn choose_pick<R>(draft: &DraftSnapshot, difficulty: Difficulty, rng: &mut R) -> Option<ShapeKind>
where
    R: Rng + ?Sized,
{
    let pool = draft.pool();
    if pool.is_empty() {
        return None;
    }
    let mine = draft.picks(draft.me());
    let theirs = draft.picks(draft.opponent());
    let filtered = |f: fn(ShapeKind) -> bool| -> Vec<ShapeKind> {
        pool.shapes().iter().copied().filter(|&s| f(s)).collect()
    };

    let pick = match difficulty {
        Difficulty::Novice => random_from(pool.shapes(), rng),
        Difficulty::Elite => {
            let versatile = filtered(is_versatile);
            if rng.random_bool(0.5) || versatile.is_empty() {
                random_from(pool.shapes(), rng)
            } else {
                random_from(&versatile, rng)
            }
        }
        Difficulty::Tactician => {
            let targets = synergy_targets(theirs, pool);
            let versatile = filtered(is_versatile);
            let tricky = filtered(is_tricky);
            if !targets.is_empty() && rng.random_bool(0.85) {
                random_from(&targets, rng)
            } else if !versatile.is_empty() && rng.random_bool(0.8) {
                random_from(&versatile, rng)
            } else if !tricky.is_empty() && rng.random_bool(0.55) {
                random_from(&tricky, rng)
            } else {
                random_from(pool.shapes(), rng)
            }
        }
        Difficulty::Grandmaster => {
            let targets = synergy_targets(theirs, pool);
            let candidates = if targets.is_empty() {
                pool.distinct().collect()
            } else {
                targets
            };
            first_max(
                candidates
                    .into_iter()
                    .map(|s| (role_coverage_score(s, mine), s)),
            )
            .map(|(_, s)| s)
        }
        Difficulty::Legendary => {
            if pool.len() <= SMALL_POOL {
                small_pool_pick(draft)
            } else {
                let targets = synergy_targets(theirs, pool);
                if targets.is_empty() {
                    first_max(pool.distinct().map(|s| (counter_score(s, theirs), s)))
                        .map(|(_, s)| s)
                } else {
                    first_max(targets.into_iter().map(|s| (denial_score(s, mine), s)))
                        .map(|(_, s)| s)
                }
            }
        }
    };
    if let Some(shape) = pick {
        log::debug!("{} ({difficulty}) drafts {shape}", draft.me());
    }
    pick
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn inventory(s: &str) -> Inventory {
        s.parse().unwrap()
    }

    fn draft(pool: &str, mine: &str, theirs: &str) -> DraftSnapshot {
        DraftSnapshot::new(inventory(pool), PlayerId::One)
            .with_picks(PlayerId::One, inventory(mine))
            .with_picks(PlayerId::Two, inventory(theirs))
    }

    #[test]
    fn test_empty_pool_is_none() {
        let draft = draft("", "IL", "XP");
        let mut rng = Pcg32::seed_from_u64(0);
        for difficulty in Difficulty::ALL {
            assert_eq!(choose_pick(&draft, difficulty, &mut rng), None);
        }
    }

    #[test]
    fn test_every_tier_picks_from_pool() {
        let draft = draft("FILNPTUVWXYZ", "", "");
        let mut rng = Pcg32::seed_from_u64(11);
        for difficulty in Difficulty::ALL {
            for _ in 0..20 {
                let pick = choose_pick(&draft, difficulty, &mut rng).unwrap();
                assert!(draft.pool().contains(pick), "{difficulty}: {pick}");
            }
        }
    }

    #[test]
    fn test_synergy_targets() {
        let targets = synergy_targets(&inventory("PT"), &inventory("XLZYV"));
        assert_eq!(targets, [ShapeKind::Z, ShapeKind::L, ShapeKind::Y]);
        assert!(synergy_targets(&inventory("XW"), &inventory("ILN")).is_empty());
    }

    #[test]
    fn test_role_coverage_score() {
        let empty = Inventory::default();
        assert!((role_coverage_score(ShapeKind::I, &empty) - 15.0).abs() < f32::EPSILON);
        assert!((role_coverage_score(ShapeKind::X, &empty) + 1.0).abs() < f32::EPSILON);
        let blockers = inventory("XWF");
        assert!((role_coverage_score(ShapeKind::U, &blockers) + 2.0).abs() < f32::EPSILON);
        let with_flexible = inventory("L");
        assert!((role_coverage_score(ShapeKind::T, &with_flexible) - 8.0).abs() < f32::EPSILON);
        assert!((role_coverage_score(ShapeKind::V, &empty) - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_kit_quality() {
        let quality = kit_quality([ShapeKind::I, ShapeKind::X, ShapeKind::V]);
        assert!((quality - (5.0 + (1.0 - 1.5) + 2.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_grandmaster_prefers_synergy_targets() {
        let draft = draft("IYXV", "", "T");
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            choose_pick(&draft, Difficulty::Grandmaster, &mut rng),
            Some(ShapeKind::Y)
        );
        let draft = self::draft("XIV", "", "W");
        assert_eq!(
            choose_pick(&draft, Difficulty::Grandmaster, &mut rng),
            Some(ShapeKind::I)
        );
    }

    #[test]
    fn test_legendary_denies_best_combo_piece() {
        let draft = draft("ZLNXUV", "", "P");
        let mut rng = Pcg32::seed_from_u64(0);
        // Z: 8 + 5.5, L: 10 + 7, N: 8 + 6
        assert_eq!(
            choose_pick(&draft, Difficulty::Legendary, &mut rng),
            Some(ShapeKind::L)
        );
    }

    #[test]
    fn test_legendary_counter_pick_without_targets() {
        let draft = draft("FUVXI", "", "");
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            choose_pick(&draft, Difficulty::Legendary, &mut rng),
            Some(ShapeKind::I)
        );
    }

    #[test]
    fn test_small_pool_lookahead() {
        // Taking the I leaves the opponent the X: 5 + 0.8 × 0.5 = 5.4.
        // Taking the X leaves the opponent the I: -0.5 - 0.8 × 5 = -4.5.
        let draft = draft("XI", "", "");
        assert_eq!(small_pool_pick(&draft), Some(ShapeKind::I));
        assert_eq!(small_pool_pick(&self::draft("", "I", "")), None);
    }

    #[test]
    fn test_small_pool_accounts_for_opponent_reply() {
        // Picks alternate self, opponent, self, opponent. Opening with a
        // 5-value shape still lands a second one (6.4); opening with the X
        // lands only one (-3.5).
        let draft = draft("ILYX", "", "");
        let pick = small_pool_pick(&draft).unwrap();
        assert_ne!(pick, ShapeKind::X);
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(choose_pick(&draft, Difficulty::Legendary, &mut rng), Some(pick));
    }

    #[test]
    fn test_top_tiers_ignore_rng() {
        let draft = draft("FILNPTUVWXYZ", "T", "PI");
        for difficulty in [Difficulty::Grandmaster, Difficulty::Legendary] {
            let a = choose_pick(&draft, difficulty, &mut Pcg32::seed_from_u64(1));
            let b = choose_pick(&draft, difficulty, &mut Pcg32::seed_from_u64(2));
            assert_eq!(a, b);
        }
    }
}
