//! Formatted output helpers for CLI commands.
//!
//! Renderers return strings so commands decide where they go.

use std::fmt::Write as _;

use appbits_push::GatheredFiles;
use appbits_resources::UploadFileDescriptor;

/// Formats a byte count with binary units, e.g. "2.0 KiB".
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn size_column(file: &UploadFileDescriptor) -> String {
    file.size
        .and_then(|s| u64::try_from(s).ok())
        .map_or_else(|| "-".to_string(), format_bytes)
}

/// Renders a gather result as an upload/present table with a summary line.
#[must_use]
pub fn render_gathered(gathered: &GatheredFiles) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:<8} {:>10}  PATH", "STATUS", "MODE", "SIZE");

    let rows = gathered
        .upload
        .iter()
        .map(|f| ("upload", f))
        .chain(gathered.present.iter().map(|f| ("present", f)));
    for (status, file) in rows {
        let _ = writeln!(
            out,
            "{:<8} {:<8} {:>10}  {}",
            status,
            file.mode,
            size_column(file),
            file.path
        );
    }

    let total = u64::try_from(gathered.upload_size()).unwrap_or(0);
    let _ = writeln!(
        out,
        "{} to upload ({}), {} already present, root {}",
        gathered.upload.len(),
        format_bytes(total),
        gathered.present.len(),
        gathered.root.display()
    );
    out
}

/// Renders one `MODE  PATH` line per file.
#[must_use]
pub fn render_modes(files: &[UploadFileDescriptor]) -> String {
    files.iter().fold(String::new(), |mut out, f| {
        let _ = writeln!(out, "{}  {}", f.mode, f.path);
        out
    })
}

/// Renders one `ignored`/`included` verdict per path.
#[must_use]
pub fn render_ignored(verdicts: &[(&str, bool)]) -> String {
    verdicts.iter().fold(String::new(), |mut out, (path, ignored)| {
        let verdict = if *ignored { "ignored" } else { "included" };
        let _ = writeln!(out, "{verdict:<8}  {path}");
        out
    })
}
