//! `increment-edx-build` - bump the build counter in edX/config/resource.h.

use anyhow::Result;
use clap::Parser;
use edx_cli::{IncrementCli, cmd, init_logging};

fn main() -> Result<()> {
    let cli = IncrementCli::parse();
    init_logging(cli.common.verbose);

    cmd::increment::run(&cli.common)
}
