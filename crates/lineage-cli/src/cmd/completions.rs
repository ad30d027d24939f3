//! `lineage completions`: shell completion scripts for every subcommand.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Command};
use clap_complete::{Shell, generate};

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to emit a script for (bash, zsh, fish, elvish, powershell).
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Emits the script under the command's own binary name.
fn write_script(shell: Shell, command: &mut Command, out: &mut dyn Write) -> Result<()> {
    let bin = command.get_name().to_string();
    generate(shell, command, bin, out);
    out.flush()?;
    Ok(())
}

pub fn run_completions(shell: Shell, command: &mut Command) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_script(shell, command, &mut out)
}
