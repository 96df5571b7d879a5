//! Completions command implementation
//!
//! Handles the `jar-guardian completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// jar-guardian completions bash > /etc/bash_completion.d/jar-guardian
///
/// # Zsh
/// jar-guardian completions zsh > ~/.zfunc/_jar-guardian
///
/// # Fish
/// jar-guardian completions fish > ~/.config/fish/completions/jar-guardian.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    // The Cli type lives in main.rs, so the command tree is rebuilt
    // here with the builder API for completion generation.
    use clap::{Arg, ArgAction, Command};

    let mut cmd = Command::new("jar-guardian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("JAR obfuscation validator")
        .arg(
            Arg::new("no-emoji")
                .long("no-emoji")
                .help("Disable emoji output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("validate").about("Validate one or more obfuscated JARs"))
        .subcommand(Command::new("compare").about("Compare an original and an obfuscated JAR"))
        .subcommand(Command::new("mapping").about("Analyze a ProGuard mapping file"))
        .subcommand(Command::new("init").about("Initialize jar-guardian configuration"))
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "jar-guardian".to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
