use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use exhibit_validator::{Config, ValidationReport, Validator};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use super::terminal::{self, Colorize};

#[derive(Debug, Parser)]
#[command(about = "Validate exhibit documents")]
pub struct Validate {
    /// Files or directories to validate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,

    /// Strip comments and processing instructions before validating
    #[arg(long)]
    sanitize: bool,

    /// Additional file extension to collect from directories (repeatable)
    #[arg(long, value_name = "EXT")]
    extension: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

#[derive(Debug)]
struct Checked {
    path: PathBuf,
    outcome: Result<ValidationReport, String>,
}

impl Checked {
    fn is_valid(&self) -> bool {
        self.outcome.as_ref().is_ok_and(ValidationReport::is_valid)
    }
}

impl Validate {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, mut config: Config) -> anyhow::Result<()> {
        config.sanitize |= self.sanitize;
        for extension in &self.extension {
            config.add_extension(extension);
        }

        let files = collect_files(&self.paths, &config)?;
        if files.is_empty() {
            anyhow::bail!("No documents found");
        }
        debug!(files = files.len(), "collected documents");

        let validator = Validator::new(config);
        let progress = self.progress_bar(files.len())?;

        let checked: Vec<Checked> = files
            .par_iter()
            .map(|path| {
                let outcome = fs::read_to_string(path)
                    .map(|text| validator.validate(&text))
                    .map_err(|e| format!("Failed to read file: {e}"));
                progress.inc(1);
                Checked {
                    path: path.clone(),
                    outcome,
                }
            })
            .collect();
        progress.finish_and_clear();

        match self.output {
            OutputFormat::Table => self.output_table(&checked),
            OutputFormat::Json => Self::output_json(&checked)?,
            OutputFormat::Summary => Self::output_summary(&checked),
        }

        if checked.iter().any(|checked| !checked.is_valid()) {
            std::process::exit(2);
        }

        Ok(())
    }

    fn progress_bar(&self, len: usize) -> anyhow::Result<ProgressBar> {
        if self.quiet || !matches!(self.output, OutputFormat::Table) {
            return Ok(ProgressBar::hidden());
        }

        let progress = ProgressBar::new(len as u64);
        progress.set_style(
            ProgressStyle::with_template("[{bar:30.cyan/dim}] {pos}/{len} documents")?
                .progress_chars("=> "),
        );
        Ok(progress)
    }

    fn output_table(&self, checked: &[Checked]) {
        let narrow = terminal::is_narrow();
        let mut invalid = 0;

        for entry in checked {
            match &entry.outcome {
                Ok(report) if report.is_valid() => {
                    if !self.quiet {
                        let warnings = report.warnings().count();
                        if warnings == 0 {
                            println!("✓ {}", entry.path.display());
                        } else {
                            println!(
                                "{}",
                                format!("✓ {} ({warnings} warnings)", entry.path.display()).info()
                            );
                        }
                    }
                }
                Ok(report) => {
                    invalid += 1;
                    println!(
                        "{}",
                        format!(
                            "✗ {} ({} errors)",
                            entry.path.display(),
                            report.errors().count()
                        )
                        .warning()
                    );
                    for diagnostic in report.diagnostics() {
                        // narrow terminals get the message without the element path
                        let line = if narrow {
                            format!("    [{}] {}", diagnostic.severity(), diagnostic.message())
                        } else {
                            format!("    {diagnostic}")
                        };
                        println!("{}", line.dim());
                    }
                }
                Err(message) => {
                    invalid += 1;
                    println!(
                        "{}",
                        format!("✗ {}: {message}", entry.path.display()).warning()
                    );
                }
            }
        }

        if self.quiet {
            return;
        }

        if invalid == 0 {
            println!(
                "\n{}",
                format!("All {} documents are valid", checked.len()).success()
            );
        } else {
            println!(
                "\n{}",
                format!("{invalid} of {} documents are invalid", checked.len()).warning()
            );
        }
    }

    fn output_json(checked: &[Checked]) -> anyhow::Result<()> {
        use serde_json::json;

        let documents: Vec<_> = checked
            .iter()
            .map(|entry| match &entry.outcome {
                Ok(report) => json!({
                    "file": entry.path,
                    "report": report,
                }),
                Err(message) => json!({
                    "file": entry.path,
                    "error": message,
                }),
            })
            .collect();

        let invalid = checked.iter().filter(|entry| !entry.is_valid()).count();
        let output = json!({
            "status": if invalid == 0 { "valid" } else { "invalid" },
            "documents": documents,
            "summary": {
                "total": checked.len(),
                "valid": checked.len() - invalid,
                "invalid": invalid,
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(checked: &[Checked]) {
        let invalid = checked.iter().filter(|entry| !entry.is_valid()).count();
        println!(
            "documents={} valid={} invalid={invalid}",
            checked.len(),
            checked.len() - invalid
        );
    }
}

/// Expands the given paths into a sorted list of files.
///
/// Files are taken as given. Directories are walked recursively, keeping
/// files whose extension the configuration accepts.
fn collect_files(paths: &[PathBuf], config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.file_type().is_file())
                    .filter(|entry| has_accepted_extension(entry.path(), config))
                    .map(walkdir::DirEntry::into_path),
            );
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            anyhow::bail!("{} does not exist", path.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn has_accepted_extension(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| config.accepts_extension(extension))
}
