//! `appbits ignored`: report which paths the ignore rules exclude.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::config::Config;
use crate::output;

/// Arguments for the `ignored` command.
#[derive(Args, Debug)]
pub struct IgnoredArgs {
    /// App root whose ignore file applies.
    pub root: PathBuf,

    /// Relative paths to check.
    #[arg(required = true)]
    pub files: Vec<String>,
}

/// Executes the `ignored` command.
///
/// # Errors
///
/// Returns an error if the ignore file cannot be read or holds an invalid
/// pattern.
pub fn execute(args: IgnoredArgs, config: &Config) -> anyhow::Result<()> {
    let rules = config
        .ignore_config()
        .rules_for(&args.root)
        .with_context(|| format!("loading ignore rules for {}", args.root.display()))?;

    let verdicts: Vec<_> = args
        .files
        .iter()
        .map(|path| (path.as_str(), rules.file_should_be_ignored(path)))
        .collect();

    print!("{}", output::render_ignored(&verdicts));
    Ok(())
}
