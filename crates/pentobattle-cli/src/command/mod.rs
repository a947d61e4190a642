use clap::{Parser, Subcommand};

use self::{choose::ChooseArg, draft::DraftArg, profile::ProfileArg, self_play::SelfPlayArg};

mod choose;
mod draft;
mod profile;
mod self_play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play complete AI-vs-AI matches, draft included
    #[command(name = "self-play")]
    SelfPlay(#[clap(flatten)] SelfPlayArg),
    /// Choose a placement for a game snapshot
    Choose(#[clap(flatten)] ChooseArg),
    /// Choose a draft pick for a draft snapshot
    Draft(#[clap(flatten)] DraftArg),
    /// Print the search profile of a difficulty tier
    Profile(#[clap(flatten)] ProfileArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
        Mode::Choose(arg) => choose::run(&arg)?,
        Mode::Draft(arg) => draft::run(&arg)?,
        Mode::Profile(arg) => profile::run(&arg)?,
    }
    Ok(())
}
