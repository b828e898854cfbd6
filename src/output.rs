//! CLI output formatting for generation runs.
//!
//! Each piece of output has a `format_*` function returning a plain string
//! and, where the CLI prints it directly, a `print_*` wrapper writing to
//! stdout. Format functions are pure — no I/O, no side effects — so tests
//! can assert on exact output without capturing stdout.
//!
//! ```text
//! notes/journal.md → notes/journal.html
//! notes/diagram.png → notes/diagram.png
//! Wrote 2 files from notes to site
//! ```

use crate::generate::FileProgress;
use std::path::Path;

/// One line per processed file: source relative path → destination
/// relative path. Identical paths on both sides mean a verbatim copy.
pub fn format_file_progress(progress: &FileProgress) -> String {
    format!(
        "{} → {}",
        progress.rel_path.display(),
        progress.dest_rel_path.display()
    )
}

/// The end-of-run summary line.
pub fn format_summary(count: usize, source_dir: &Path, target_dir: &Path) -> String {
    format!(
        "Wrote {} files from {} to {}",
        count,
        source_dir.display(),
        target_dir.display()
    )
}

pub fn print_file_progress(progress: &FileProgress) {
    println!("{}", format_file_progress(progress));
}

pub fn print_summary(count: usize, source_dir: &Path, target_dir: &Path) {
    println!("{}", format_summary(count, source_dir, target_dir));
}
