// src/bin/generate_ids.rs
use clap::Parser;
use npc_locale::cli::{self, GenerateIdsArgs};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    npc_locale::log::init();

    cli::generate_ids(GenerateIdsArgs::parse())?;
    Ok(())
}
