// src/bin/localize_npcs.rs
use clap::Parser;
use npc_locale::cli::{self, LocalizeArgs};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    npc_locale::log::init();

    cli::localize_npcs(LocalizeArgs::parse())?;
    Ok(())
}
