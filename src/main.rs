use clap::{Parser, Subcommand};
use clap_complete::Shell;
use jar_guardian::cmd;
use std::path::PathBuf;
use std::process;

/// JAR obfuscation validator
///
/// jar-guardian runs deterministic static checks against obfuscated
/// Java archives: class-rename verification via ProGuard mapping
/// files, string-encryption and control-flow heuristics, and report or
/// certificate generation for release sign-off.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more obfuscated JARs
    Validate {
        /// JAR files to validate
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// ProGuard mapping file to verify renames against
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,

        /// Write a Markdown validation report per file
        #[arg(long)]
        report: bool,

        /// Write a validation certificate per file
        #[arg(long)]
        certificate: bool,

        /// Directory report and certificate files are written into
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Append the run to the local validation history
        #[arg(long)]
        save: bool,
    },

    /// Compare an original and an obfuscated JAR
    Compare {
        /// Original (pre-obfuscation) JAR
        original: String,

        /// Obfuscated JAR
        obfuscated: String,

        /// ProGuard mapping file for rename details
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a ProGuard mapping file
    Mapping {
        /// Mapping file (.txt or .map)
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize jar-guardian configuration
    Init {
        /// Template to use: minimal, standard, strict
        #[arg(short, long, default_value = "standard")]
        template: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Validate {
            files,
            mapping,
            json,
            report,
            certificate,
            out_dir,
            save,
        }) => {
            let options = cmd::ValidateOptions {
                mapping: mapping.clone(),
                json: *json,
                report: *report,
                certificate: *certificate,
                out_dir: out_dir.clone(),
                save: *save,
            };
            cmd::cmd_validate(files, &options)
        }
        Some(Commands::Compare {
            original,
            obfuscated,
            mapping,
            json,
        }) => cmd::cmd_compare(original, obfuscated, mapping.as_deref(), *json),
        Some(Commands::Mapping { file, json }) => cmd::cmd_mapping(file, *json),
        Some(Commands::Init { template }) => cmd::cmd_init(template),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("jar-guardian v{}", env!("CARGO_PKG_VERSION"));
            println!("JAR obfuscation validator\n");
            println!("Usage: jar-guardian <COMMAND>\n");
            println!("Commands:");
            println!("  validate  Validate one or more obfuscated JARs");
            println!("  compare   Compare an original and an obfuscated JAR");
            println!("  mapping   Analyze a ProGuard mapping file");
            println!("  init      Initialize jar-guardian configuration");
            println!("\nRun 'jar-guardian <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use jar_guardian::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
