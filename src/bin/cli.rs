// src/bin/cli.rs
use diy_recipes::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run()
}
