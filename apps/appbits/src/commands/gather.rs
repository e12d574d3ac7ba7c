//! `appbits gather`: split an app into files to upload and files present.

use std::path::PathBuf;

use anyhow::Context;
use appbits_app_files::{AppFiles, ZipArchiver};
use appbits_push::PushActor;
use clap::Args;

use crate::commands::{Scratch, load_known};
use crate::config::Config;
use crate::output;

/// Arguments for the `gather` command.
#[derive(Args, Debug)]
pub struct GatherArgs {
    /// App directory or zip archive.
    pub path: PathBuf,

    /// JSON array of resources the server already holds.
    #[arg(long)]
    pub known: Option<PathBuf>,

    /// Existing empty directory to extract archives into.
    #[arg(long)]
    pub scratch: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `gather` command.
///
/// # Errors
///
/// Returns an error if the source cannot be extracted, walked, matched or
/// annotated.
pub fn execute(args: GatherArgs, config: &Config) -> anyhow::Result<()> {
    let zipper = ZipArchiver::new();
    let walker = AppFiles::new(config.ignore_config());
    let matcher = load_known(args.known.as_deref())?;
    let scratch = Scratch::new(args.scratch, config)?;

    let actor = PushActor::new(&zipper, &walker, &matcher);
    let gathered = actor
        .gather_files(&args.path, scratch.path())
        .with_context(|| format!("gathering {}", args.path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&gathered)?);
    } else {
        print!("{}", output::render_gathered(&gathered));
    }
    Ok(())
}
