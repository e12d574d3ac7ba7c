//! `appbits modes`: print the POSIX mode of files under an app root.

use std::path::PathBuf;

use appbits_app_files::{AppFiles, KnownResources, ZipArchiver};
use appbits_push::PushActor;
use appbits_resources::LocalFileRecord;
use clap::Args;

use crate::output;

/// Arguments for the `modes` command.
#[derive(Args, Debug)]
pub struct ModesArgs {
    /// App root the files are relative to.
    pub root: PathBuf,

    /// Relative paths of the files.
    #[arg(required = true)]
    pub files: Vec<String>,
}

/// Executes the `modes` command.
///
/// # Errors
///
/// Returns an error on the first file whose mode cannot be read.
pub fn execute(args: ModesArgs) -> anyhow::Result<()> {
    let zipper = ZipArchiver::new();
    let walker = AppFiles::default();
    let matcher = KnownResources::default();
    let actor = PushActor::new(&zipper, &walker, &matcher);

    let records: Vec<_> = args.files.into_iter().map(LocalFileRecord::new).collect();
    let annotated = actor.populate_file_mode(&args.root, &records)?;

    print!("{}", output::render_modes(&annotated));
    Ok(())
}
