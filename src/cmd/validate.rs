//! Validate command implementation
//!
//! Handles the `jar-guardian validate` command: runs the full check
//! sequence on one or more JARs, optionally writing report and
//! certificate artifacts and appending the run to the local history.

use anyhow::Result;
use console::style;
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{ConfigFile, ConfigLoader};
use crate::fmt::{format_file_size, CHECKMARK, CROSSMARK, MICROSCOPE, WARNING};
use crate::infra::{FileSystem, RealFileSystem};
use crate::intake::{self, JarInput};
use crate::mapping::MappingSet;
use crate::report::{
    certificate_file_name, render_certificate, render_report, report_file_name, ReportContext,
};
use crate::runner::{run_validation, ConsoleSink, NoOpSink, RunReport, TestStatus};
use crate::store::{ValidationRecord, ValidationStore};

/// Options for one `validate` invocation
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// ProGuard mapping file to verify renames against
    pub mapping: Option<PathBuf>,
    /// Emit machine-readable JSON instead of console output
    pub json: bool,
    /// Write a Markdown report artifact per file
    pub report: bool,
    /// Write a certificate artifact per file
    pub certificate: bool,
    /// Directory artifacts are written into
    pub out_dir: Option<PathBuf>,
    /// Append each run to the local validation history
    pub save: bool,
}

/// One file's outcome, as printed or serialized
#[derive(Debug, Serialize)]
struct FileOutcome {
    file_name: String,
    file_size: u64,
    pass_rate: u32,
    succeeded: bool,
    results: Vec<crate::runner::TestResult>,
}

/// Run the validation sequence on each input file.
///
/// Files are analyzed in parallel; output follows input order. Returns
/// an error when any run ends with a failed result, so CI pipelines
/// can gate on the exit code.
pub fn cmd_validate(files: &[String], options: &ValidateOptions) -> Result<()> {
    let project_root = env::current_dir()?;
    cmd_validate_impl(files, options, &project_root, &RealFileSystem)
}

fn cmd_validate_impl<FS: FileSystem + Sync>(
    files: &[String],
    options: &ValidateOptions,
    project_root: &Path,
    fs: &FS,
) -> Result<()> {
    let config = ConfigLoader::load_with_fs(project_root, fs)?;

    let mapping = match &options.mapping {
        Some(path) => {
            let text = intake::read_mapping_text(path, fs)?;
            Some(MappingSet::parse(&text))
        }
        None => None,
    };

    // A console progress bar only makes sense for a single,
    // human-facing run.
    let show_progress = !options.json && files.len() == 1;

    let inputs: Vec<JarInput> = files
        .iter()
        .map(|file| JarInput::read(Path::new(file), "validate", fs))
        .collect::<Result<_, _>>()?;

    let reports: Vec<RunReport> = inputs
        .par_iter()
        .map(|input| {
            if show_progress {
                let sink = ConsoleSink::new(&input.file_name);
                let report =
                    run_validation(&input.file_name, &input.bytes, &config, mapping.as_ref(), &sink);
                sink.finish();
                report
            } else {
                run_validation(
                    &input.file_name,
                    &input.bytes,
                    &config,
                    mapping.as_ref(),
                    &NoOpSink,
                )
            }
        })
        .collect();

    let outcomes: Vec<FileOutcome> = inputs
        .iter()
        .zip(&reports)
        .map(|(input, report)| FileOutcome {
            file_name: input.file_name.clone(),
            file_size: input.size,
            pass_rate: report.pass_rate(),
            succeeded: report.succeeded(),
            results: report.results.clone(),
        })
        .collect();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for outcome in &outcomes {
            print_outcome(outcome);
        }
    }

    write_artifacts(&inputs, &reports, options, &config, project_root, fs)?;

    if options.save {
        save_history(&inputs, &reports, &config, project_root, fs);
    }

    let failed = outcomes.iter().filter(|o| !o.succeeded).count();
    if failed > 0 {
        anyhow::bail!("Validation failed for {} of {} file(s)", failed, files.len());
    }

    Ok(())
}

fn print_outcome(outcome: &FileOutcome) {
    println!();
    println!(
        "{} {} ({})",
        MICROSCOPE,
        style(&outcome.file_name).bold(),
        format_file_size(outcome.file_size)
    );

    for result in &outcome.results {
        let marker = match result.status {
            TestStatus::Success => style(result.status.marker()).green(),
            TestStatus::Failed => style(result.status.marker()).red(),
            TestStatus::Warning => style(result.status.marker()).yellow(),
            _ => style(result.status.marker()).dim(),
        };
        println!("  {} {}: {}", marker, style(&result.name).bold(), result.message);
    }

    println!();
    if outcome.succeeded {
        println!(
            "{} {} — pass rate {}%",
            CHECKMARK,
            style("Validation passed").green().bold(),
            outcome.pass_rate
        );
    } else {
        println!(
            "{} {} — pass rate {}%",
            CROSSMARK,
            style("Validation failed").red().bold(),
            outcome.pass_rate
        );
    }
}

fn write_artifacts<FS: FileSystem>(
    inputs: &[JarInput],
    reports: &[RunReport],
    options: &ValidateOptions,
    config: &ConfigFile,
    project_root: &Path,
    fs: &FS,
) -> Result<()> {
    if !options.report && !options.certificate {
        return Ok(());
    }

    let out_dir = options
        .out_dir
        .clone()
        .or_else(|| config.report.as_ref().and_then(|r| r.out_dir.clone()))
        .unwrap_or_else(|| project_root.to_path_buf());
    fs.create_dir_all(&out_dir)?;

    for (input, report) in inputs.iter().zip(reports) {
        let ctx = ReportContext::new(&input.file_name, input.size, report.clone());

        if options.report {
            let path = out_dir.join(report_file_name(&input.file_name));
            fs.write(&path, render_report(&ctx))?;
            if !options.json {
                println!("{} Report written to {}", CHECKMARK, style(path.display()).cyan());
            }
        }

        if options.certificate {
            let path = out_dir.join(certificate_file_name(&input.file_name));
            fs.write(&path, render_certificate(&ctx))?;
            if !options.json {
                println!(
                    "{} Certificate written to {}",
                    CHECKMARK,
                    style(path.display()).cyan()
                );
            }
        }
    }

    Ok(())
}

/// History persistence is fire-and-forget: a failed save is logged and
/// reported, but never fails the validation run itself.
fn save_history<FS: FileSystem>(
    inputs: &[JarInput],
    reports: &[RunReport],
    config: &ConfigFile,
    project_root: &Path,
    fs: &FS,
) {
    let mut store = match ValidationStore::load_with_fs(project_root, fs) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Could not load validation history: {e:#}");
            eprintln!("{} Validation history unavailable, results not saved", WARNING);
            return;
        }
    };

    for (input, report) in inputs.iter().zip(reports) {
        let record = ValidationRecord::new(
            &input.file_name,
            input.size,
            config.clone(),
            report.results.clone(),
        );
        let id = store.append(record);
        log::debug!("Recorded validation {id} for {}", input.file_name);
    }

    if let Err(e) = store.save_with_fs(project_root, fs) {
        log::warn!("Could not save validation history: {e:#}");
        eprintln!("{} Could not save validation history", WARNING);
    }
}
