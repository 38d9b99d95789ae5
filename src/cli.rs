use std::{
    fs,
    path::{Path, PathBuf},
};

mod date;
mod terminal;
mod validate;

use anyhow::Context;
use clap::ArgAction;
use date::Date;
use exhibit_validator::{Config, Validator, document::sanitize, schema::EXHIBIT_SCHEMA};
use tracing::{debug, instrument};
use validate::Validate;

/// Default location of the configuration file.
const CONFIG_FILE: &str = "exval.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.command.run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Validate exhibit documents
    ///
    /// Directories are searched recursively for files with one of the
    /// configured extensions.
    Validate(Validate),

    /// Print the full validation report for one document
    Report(Report),

    /// Interpret historical date expressions
    Date(Date),

    /// Print the exhibit schema
    Schema,

    /// Print a document with comments and processing instructions removed
    Sanitize(Sanitize),

    /// Write a default configuration file
    Init,
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Validate(command) => command.run(load_config(config_path)?)?,
            Self::Report(command) => command.run(load_config(config_path)?)?,
            Self::Date(command) => command.run(),
            Self::Schema => print!("{EXHIBIT_SCHEMA}"),
            Self::Sanitize(command) => command.run()?,
            Self::Init => init(config_path)?,
        }
        Ok(())
    }
}

/// Loads the configuration, falling back to defaults if there is no file.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no configuration file, using defaults");
        return Ok(Config::default());
    }
    Config::load(path).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

#[instrument]
fn init(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!(
            "Configuration file {} already exists",
            path.display()
        );
    }

    Config::default()
        .save(path)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[derive(Debug, clap::Parser)]
pub struct Report {
    /// The document to validate
    file: PathBuf,

    /// Strip comments and processing instructions before validating
    #[arg(long)]
    sanitize: bool,
}

impl Report {
    #[instrument(skip(config))]
    fn run(self, mut config: Config) -> anyhow::Result<()> {
        config.sanitize |= self.sanitize;
        let text = read_document(&self.file)?;
        let report = Validator::new(config).validate(&text);

        print!("{report}");

        if !report.is_valid() {
            std::process::exit(2);
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Sanitize {
    /// The document to clean up
    file: PathBuf,
}

impl Sanitize {
    #[instrument]
    fn run(self) -> anyhow::Result<()> {
        let text = read_document(&self.file)?;
        println!("{}", sanitize(&text));
        Ok(())
    }
}
