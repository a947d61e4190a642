use std::path::PathBuf;

use anyhow::Context as _;
use pentobattle_ai::DecisionEngine;
use pentobattle_engine::{Board, DraftSnapshot, GameSnapshot, Inventory, Move, PlayerId};
use rand::Rng;
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Difficulty tier of player 1, by name or number 1-5
    #[clap(long, default_value = "legendary")]
    p1: String,
    /// Difficulty tier of player 2, by name or number 1-5
    #[clap(long, default_value = "legendary")]
    p2: String,
    /// Search profile file (JSON format) for player 1
    #[clap(long)]
    p1_profile: Option<PathBuf>,
    /// Search profile file (JSON format) for player 2
    #[clap(long)]
    p2_profile: Option<PathBuf>,
    /// Number of matches to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Board width
    #[clap(long, default_value_t = Board::STANDARD_WIDTH)]
    width: u8,
    /// Board height
    #[clap(long, default_value_t = Board::STANDARD_HEIGHT)]
    height: u8,
    /// Forbid mirrored orientations
    #[clap(long)]
    no_mirror: bool,
    /// Seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,
    /// Save match records to this file (JSON format)
    #[clap(long)]
    record: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct MatchRecord {
    picks: [Inventory; 2],
    turns: Vec<Turn>,
    board: Board,
    winner: PlayerId,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Turn {
    player: PlayerId,
    #[serde(rename = "move")]
    mv: Move,
}

#[derive(Debug, Clone, Serialize)]
struct SelfPlayReport {
    seed: u64,
    matches: Vec<MatchRecord>,
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        p1,
        p2,
        p1_profile,
        p2_profile,
        games,
        width,
        height,
        no_mirror,
        seed,
        record,
    } = arg;

    let engines = [
        util::build_engine(p1, p1_profile.as_deref())?,
        util::build_engine(p2, p2_profile.as_deref())?,
    ];
    let (seed, mut rng) = util::seeded_rng(*seed);
    log::info!(
        "{} vs {}, {games} game(s), seed {seed}",
        engines[0].difficulty(),
        engines[1].difficulty()
    );

    let board = empty_board(*width, *height)?;
    let mut wins = [0_usize; 2];
    let mut matches = Vec::with_capacity(*games);
    for game in 1..=*games {
        let record = play_match(&engines, board.clone(), !*no_mirror, &mut rng)
            .with_context(|| format!("Match {game} failed"))?;
        wins[record.winner.index()] += 1;

        println!("Game {game}");
        println!("{}", record.board);
        println!(
            "P1 {} vs P2 {}: {} wins after {} placements",
            record.picks[0],
            record.picks[1],
            record.winner,
            record.turns.len()
        );
        println!();
        matches.push(record);
    }

    if *games > 1 {
        println!(
            "{} (P1) {} - {} {} (P2)",
            engines[0].difficulty(),
            wins[0],
            wins[1],
            engines[1].difficulty()
        );
    }
    if let Some(path) = record {
        util::write_json(&SelfPlayReport { seed, matches }, Some(path.as_path()))?;
    }
    Ok(())
}

fn empty_board(width: u8, height: u8) -> anyhow::Result<Board> {
    anyhow::ensure!(
        width > 0 && height > 0,
        "Board size must be positive, got {width}x{height}"
    );
    Ok(Board::new(width, height))
}

/// Plays one match: alternating draft picks starting with player 1 until the
/// pool is empty, then alternating placements starting with player 1. The
/// first player left without a legal placement loses.
fn play_match<R>(
    engines: &[DecisionEngine; 2],
    board: Board,
    allow_mirror: bool,
    rng: &mut R,
) -> anyhow::Result<MatchRecord>
where
    R: Rng + ?Sized,
{
    let mut draft = DraftSnapshot::full_pool(PlayerId::One);
    let mut picker = PlayerId::One;
    while !draft.pool().is_empty() {
        let view = draft.clone().with_me(picker);
        let pick = engines[picker.index()]
            .choose_draft_pick(&view, rng)
            .context("No draft pick from a non-empty pool")?;
        log::debug!("{picker} drafts {pick}");
        draft = draft
            .after_pick(picker, pick)
            .with_context(|| format!("{picker} drafted {pick}, which is not in the pool"))?;
        picker = picker.opponent();
    }

    let picks = [
        draft.picks(PlayerId::One).clone(),
        draft.picks(PlayerId::Two).clone(),
    ];
    let mut snapshot = GameSnapshot::new(board, PlayerId::One)
        .with_inventory(PlayerId::One, picks[0].clone())
        .with_inventory(PlayerId::Two, picks[1].clone())
        .with_allow_mirror(allow_mirror);
    let mut mover = PlayerId::One;
    let mut turns = vec![];
    while snapshot.has_any_legal_move(mover) {
        let view = snapshot.clone().with_me(mover);
        let mv = engines[mover.index()]
            .choose_placement(&view, rng)
            .with_context(|| format!("{mover} has a legal move but chose none"))?;
        anyhow::ensure!(
            snapshot.legal_moves(mover).contains(&mv),
            "{mover} chose an illegal move {mv}"
        );
        snapshot = snapshot.after_move(mover, &mv);
        turns.push(Turn { player: mover, mv });
        mover = mover.opponent();
    }

    Ok(MatchRecord {
        picks,
        turns,
        board: snapshot.board().clone(),
        winner: mover.opponent(),
    })
}

#[cfg(test)]
mod tests {
    use pentobattle_ai::Difficulty;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn engines(p1: Difficulty, p2: Difficulty) -> [DecisionEngine; 2] {
        [DecisionEngine::new(p1), DecisionEngine::new(p2)]
    }

    #[test]
    fn test_empty_board_rejects_zero_size() {
        assert!(empty_board(0, 6).is_err());
        assert!(empty_board(10, 0).is_err());
        assert_eq!(empty_board(10, 6).unwrap(), Board::standard());
    }

    #[test]
    fn test_match_runs_to_completion() {
        let engines = engines(Difficulty::Novice, Difficulty::Elite);
        let mut rng = Pcg32::seed_from_u64(11);
        let record = play_match(&engines, Board::standard(), true, &mut rng).unwrap();

        assert_eq!(record.picks[0].len(), 6);
        assert_eq!(record.picks[1].len(), 6);
        assert!(!record.turns.is_empty());
        for (i, turn) in record.turns.iter().enumerate() {
            let expected = if i % 2 == 0 {
                PlayerId::One
            } else {
                PlayerId::Two
            };
            assert_eq!(turn.player, expected);
            assert!(record.picks[turn.player.index()].contains(turn.mv.shape()));
        }
        let last = record.turns.last().unwrap();
        assert_eq!(record.winner, last.player);
        assert_eq!(
            record.board.count_empty() + 5 * record.turns.len(),
            record.board.area()
        );
    }

    #[test]
    fn test_same_seed_replays_the_same_match() {
        let engines = engines(Difficulty::Tactician, Difficulty::Novice);
        let a = play_match(&engines, Board::standard(), true, &mut Pcg32::seed_from_u64(3)).unwrap();
        let b = play_match(&engines, Board::standard(), true, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(a.board, b.board);
        assert_eq!(a.winner, b.winner);
    }

    #[test]
    fn test_record_serializes_moves() {
        let engines = engines(Difficulty::Novice, Difficulty::Novice);
        let mut rng = Pcg32::seed_from_u64(0);
        let record = play_match(&engines, Board::standard(), false, &mut rng).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        let first = &json["turns"][0];
        assert_eq!(first["player"], 1);
        assert_eq!(
            first["move"].as_str().unwrap(),
            record.turns[0].mv.to_string()
        );
        assert_eq!(json["board"].as_array().unwrap().len(), 6);
    }
}
