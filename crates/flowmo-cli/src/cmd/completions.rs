use std::io::Write;

use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `flowmo completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `out`.
pub fn run_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, "flowmo", out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    #[test]
    fn script_names_the_binary_and_its_subcommands() {
        let mut command = Command::new("flowmo")
            .subcommand(Command::new("solve").arg(Arg::new("input")))
            .subcommand(Command::new("inspect"));

        let mut buf = Vec::new();
        run_completions(Shell::Bash, &mut command, &mut buf);
        let script = String::from_utf8(buf).expect("utf8");

        assert!(script.contains("flowmo"));
        assert!(script.contains("solve"));
        assert!(script.contains("inspect"));
    }
}
