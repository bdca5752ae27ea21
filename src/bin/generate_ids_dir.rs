// src/bin/generate_ids_dir.rs
use clap::Parser;
use npc_locale::cli::{self, GenerateIdsDirArgs};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    npc_locale::log::init();

    cli::generate_ids_dir(GenerateIdsDirArgs::parse())?;
    Ok(())
}
