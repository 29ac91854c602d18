// src/bin/merge.rs
use nickboard::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()?;
    Ok(())
}
