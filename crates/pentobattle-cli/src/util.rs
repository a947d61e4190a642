use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use pentobattle_ai::{DecisionEngine, Difficulty, SearchProfile};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let target = path.map_or_else(|| "stdout".to_owned(), |p| p.display().to_string());
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {target}")
        })?)),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {target}"))?;
    if path.is_some() {
        log::info!("Saved {target}");
    }
    Ok(())
}

pub fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Engine for `difficulty` (unknown names fall back to the strongest tier),
/// optionally with its search profile replaced from a JSON file.
pub fn build_engine(
    difficulty: &str,
    profile_path: Option<&Path>,
) -> anyhow::Result<DecisionEngine> {
    let engine = DecisionEngine::new(Difficulty::parse_or_strongest(difficulty));
    let Some(path) = profile_path else {
        return Ok(engine);
    };
    let profile: SearchProfile = read_json_file("search profile", path)?;
    log::info!("{} uses profile {}", engine.difficulty(), path.display());
    Ok(engine.with_profile(profile))
}

/// Generator seeded with `seed`, or with a fresh random seed. Returns the seed
/// actually used so runs can be reproduced.
pub fn seeded_rng(seed: Option<u64>) -> (u64, Pcg32) {
    let seed = seed.unwrap_or_else(rand::random);
    (seed, Pcg32::seed_from_u64(seed))
}
