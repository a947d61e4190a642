use std::path::PathBuf;

use pentobattle_engine::GameSnapshot;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ChooseArg {
    /// Game snapshot file (JSON format)
    snapshot_path: PathBuf,
    /// Difficulty tier, by name or number 1-5
    #[clap(long, short, default_value = "legendary")]
    difficulty: String,
    /// Search profile file (JSON format) replacing the tier's defaults
    #[clap(long)]
    profile: Option<PathBuf>,
    /// Seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ChooseArg) -> anyhow::Result<()> {
    let ChooseArg {
        snapshot_path,
        difficulty,
        profile,
        seed,
        output,
    } = arg;

    let snapshot: GameSnapshot = util::read_json_file("game snapshot", snapshot_path)?;
    let engine = util::build_engine(difficulty, profile.as_deref())?;
    let (seed, mut rng) = util::seeded_rng(*seed);
    log::debug!("seed {seed}");

    let choice = engine.choose_placement(&snapshot, &mut rng);
    if choice.is_none() {
        log::info!("{} has no legal move", snapshot.me());
    }
    util::write_json(&choice, output.as_deref())
}
