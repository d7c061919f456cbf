//! CLI entry point for the gem board demo

use clap::Parser;
use worldgrid::io::cli::{BoardRunner, Cli};

fn main() -> worldgrid::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let runner = BoardRunner::new(cli);
    let summary = runner.run()?;
    let found = summary.probes.iter().filter(|probe| probe.gem.is_some()).count();
    log::info!(
        "board ready: {} cells written, {} dirty, {found}/{} probes hit a gem",
        summary.cells_written,
        summary.dirty_cells,
        summary.probes.len()
    );
    Ok(())
}
