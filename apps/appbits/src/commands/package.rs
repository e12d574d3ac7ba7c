//! `appbits package`: gather an app and write the upload archive.

use std::path::PathBuf;

use anyhow::Context;
use appbits_app_files::{AppFiles, ZipArchiver};
use appbits_push::PushActor;
use clap::Args;

use crate::commands::{Scratch, load_known};
use crate::config::Config;
use crate::output::format_bytes;

/// Arguments for the `package` command.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// App directory or zip archive.
    pub path: PathBuf,

    /// Archive to write.
    pub dest: PathBuf,

    /// JSON array of resources the server already holds.
    #[arg(long)]
    pub known: Option<PathBuf>,

    /// Existing empty directory to extract archives into.
    #[arg(long)]
    pub scratch: Option<PathBuf>,

    /// Also write the already-present resources as JSON to this file.
    #[arg(long)]
    pub resources: Option<PathBuf>,
}

/// Executes the `package` command.
///
/// # Errors
///
/// Returns an error if gathering fails or the archive cannot be written.
pub fn execute(args: PackageArgs, config: &Config) -> anyhow::Result<()> {
    let zipper = ZipArchiver::new();
    let walker = AppFiles::new(config.ignore_config());
    let matcher = load_known(args.known.as_deref())?;
    let scratch = Scratch::new(args.scratch, config)?;

    let actor = PushActor::new(&zipper, &walker, &matcher);
    let gathered = actor
        .gather_files(&args.path, scratch.path())
        .with_context(|| format!("gathering {}", args.path.display()))?;

    if let Some(path) = &args.resources {
        let json = serde_json::to_string_pretty(&gathered.present_resources())?;
        std::fs::write(path, json)
            .with_context(|| format!("writing resources to {}", path.display()))?;
    }

    match actor.build_upload_archive(&gathered, &args.dest)? {
        Some(archive) => println!(
            "packaged {} files ({}) into {}, {} already present",
            gathered.upload.len(),
            format_bytes(u64::try_from(gathered.upload_size()).unwrap_or(0)),
            archive.display(),
            gathered.present.len(),
        ),
        None => println!(
            "nothing to upload, {} files already present",
            gathered.present.len()
        ),
    }
    Ok(())
}
