//! `set-edx-version` - set the release version in edX/config/resource.h.

use anyhow::Result;
use clap::Parser;
use edx_cli::{SetCli, cmd, init_logging};

fn main() -> Result<()> {
    let cli = SetCli::parse();
    init_logging(cli.common.verbose);

    cmd::set::run(&cli.release, &cli.common)
}
