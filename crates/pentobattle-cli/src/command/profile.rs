use std::path::PathBuf;

use pentobattle_ai::Difficulty;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProfileArg {
    /// Difficulty tier, by name or number 1-5
    #[clap(default_value = "legendary")]
    difficulty: String,
    /// Output file path (default: stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProfileArg) -> anyhow::Result<()> {
    let difficulty = Difficulty::parse_or_strongest(&arg.difficulty);
    util::write_json(&difficulty.profile(), arg.output.as_deref())
}
