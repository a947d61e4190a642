use std::path::PathBuf;

use pentobattle_engine::DraftSnapshot;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DraftArg {
    /// Draft snapshot file (JSON format)
    snapshot_path: PathBuf,
    /// Difficulty tier, by name or number 1-5
    #[clap(long, short, default_value = "legendary")]
    difficulty: String,
    /// Seed for the random number generator
    #[clap(long)]
    seed: Option<u64>,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DraftArg) -> anyhow::Result<()> {
    let DraftArg {
        snapshot_path,
        difficulty,
        seed,
        output,
    } = arg;

    let draft: DraftSnapshot = util::read_json_file("draft snapshot", snapshot_path)?;
    let engine = util::build_engine(difficulty, None)?;
    let (_, mut rng) = util::seeded_rng(*seed);

    let pick = engine.choose_draft_pick(&draft, &mut rng);
    util::write_json(&pick, output.as_deref())
}
