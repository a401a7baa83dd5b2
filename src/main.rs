use std::io::{self, Write};

use anyhow::anyhow;
use clap::Parser;

use ledcat::cli::{Cli, run};
use ledcat::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json).map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)?;
    out.flush()?;
    Ok(())
}
