//! Static shell completions

use std::io;

use clap::CommandFactory;

use crate::cli::{Cli, Shell};

/// Print completions for `shell` to stdout
pub fn run(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}
