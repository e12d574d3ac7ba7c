//! CLI command definitions and dispatch.

pub mod gather;
pub mod ignored;
pub mod modes;
pub mod package;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use appbits_app_files::KnownResources;
use clap::{Parser, Subcommand};
use tempfile::TempDir;

use crate::config::Config;

/// appbits: decide what an app push has to upload.
#[derive(Parser, Debug)]
#[command(name = "appbits", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split an app into files to upload and files already present.
    Gather(gather::GatherArgs),
    /// Print the POSIX mode of files under an app root.
    Modes(modes::ModesArgs),
    /// Gather an app and write the upload archive.
    Package(package::PackageArgs),
    /// Report which paths the ignore rules exclude.
    Ignored(ignored::IgnoredArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli, config: &Config) -> anyhow::Result<()> {
    match cli.command {
        Command::Gather(args) => gather::execute(args, config),
        Command::Modes(args) => modes::execute(args),
        Command::Package(args) => package::execute(args, config),
        Command::Ignored(args) => ignored::execute(args, config),
    }
}

/// Loads the resources the server already holds, or none.
pub(crate) fn load_known(path: Option<&Path>) -> anyhow::Result<KnownResources> {
    let Some(path) = path else {
        return Ok(KnownResources::default());
    };
    let known = KnownResources::load(path)
        .with_context(|| format!("loading known resources from {}", path.display()))?;
    tracing::debug!(count = known.len(), path = %path.display(), "known resources loaded");
    Ok(known)
}

/// Directory archives are extracted into.
///
/// A temporary directory is removed when dropped; a caller-provided one is
/// left in place.
pub(crate) enum Scratch {
    Temp(TempDir),
    Given(PathBuf),
}

impl Scratch {
    pub(crate) fn new(explicit: Option<PathBuf>, config: &Config) -> anyhow::Result<Self> {
        if let Some(dir) = explicit {
            if !dir.is_dir() {
                bail!("scratch directory {} does not exist", dir.display());
            }
            let occupied = std::fs::read_dir(&dir)
                .with_context(|| format!("reading scratch directory {}", dir.display()))?
                .next()
                .is_some();
            if occupied {
                bail!("scratch directory {} is not empty", dir.display());
            }
            return Ok(Self::Given(dir));
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("appbits-");
        let temp = match &config.scratch_base {
            Some(base) => builder
                .tempdir_in(base)
                .with_context(|| format!("creating scratch directory in {}", base.display()))?,
            None => builder.tempdir().context("creating scratch directory")?,
        };
        Ok(Self::Temp(temp))
    }

    pub(crate) fn path(&self) -> &Path {
        match self {
            Self::Temp(dir) => dir.path(),
            Self::Given(dir) => dir,
        }
    }
}
