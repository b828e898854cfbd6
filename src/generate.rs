//! Site generation: walk the source tree, rebuild the destination tree.
//!
//! [`Generator`] mirrors a source directory into a destination directory.
//! Markdown files are converted to HTML pages through [`crate::convert`];
//! everything else is copied byte-for-byte. Relative paths are preserved,
//! so the destination is the source tree with `.md` swapped for `.html`.
//!
//! ## Full Rebuild
//!
//! Every run deletes the destination tree and regenerates it from scratch.
//! There is no diffing and no cache: the output after a run is a function of
//! the source tree at that run alone, and stale files from earlier runs
//! cannot survive. A source tree with no files at all produces no
//! destination directory.
//!
//! ## Parallel Dispatch
//!
//! Each file's copy or conversion is an independent unit of work, dispatched
//! on the [rayon](https://docs.rs/rayon) pool with no ordering between
//! units. The destination directory tree is the only shared mutable state;
//! two units racing to create a common parent directory is harmless because
//! `create_dir_all` succeeds on an existing directory. The first failing
//! unit aborts the run — already-dispatched units may still finish and
//! write their output before the failure surfaces to the caller.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

use crate::convert::{ConvertError, DocConverter};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Source directory {0} does not exist")]
    SourceMissing(PathBuf),
    #[error("Template file {0} does not exist")]
    TemplateMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// How a discovered file will be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Extension is the literal `md` (case-sensitive): converted to HTML
    Markup,
    /// Anything else: copied verbatim
    Other,
}

/// One file found under the source root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute (or caller-rooted) path of the source file
    pub source_path: PathBuf,
    /// Path relative to the source root; fixes the destination path
    pub rel_path: PathBuf,
    pub kind: FileKind,
}

/// Progress event emitted after a file has been written.
///
/// Events arrive in completion order, which under parallel dispatch is not
/// the discovery order.
#[derive(Debug, Clone)]
pub struct FileProgress {
    pub rel_path: PathBuf,
    pub dest_rel_path: PathBuf,
    pub kind: FileKind,
}

/// Mirrors a source directory of documents into a destination directory.
#[derive(Debug)]
pub struct Generator {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    converter: DocConverter,
}

impl Generator {
    /// Validate inputs and load the page template.
    ///
    /// Fails if the source directory or template file is missing, or the
    /// template is empty. No side effects: the destination is not touched
    /// until [`generate`](Self::generate).
    pub fn new(
        source_dir: &Path,
        dest_dir: &Path,
        template_file: &Path,
    ) -> Result<Self, GenerateError> {
        if !source_dir.is_dir() {
            return Err(GenerateError::SourceMissing(source_dir.to_path_buf()));
        }
        if !template_file.is_file() {
            return Err(GenerateError::TemplateMissing(template_file.to_path_buf()));
        }
        let template = fs::read_to_string(template_file)?;
        let converter = DocConverter::new(&template)?;

        Ok(Self {
            source_dir: source_dir.to_path_buf(),
            dest_dir: dest_dir.to_path_buf(),
            converter,
        })
    }

    /// Rebuild the destination tree. Returns the number of files processed.
    pub fn generate(&self) -> Result<usize, GenerateError> {
        self.generate_with_progress(None)
    }

    /// [`generate`](Self::generate), reporting each written file on `progress`.
    ///
    /// Send failures are ignored — a dropped receiver must not fail the run.
    pub fn generate_with_progress(
        &self,
        progress: Option<Sender<FileProgress>>,
    ) -> Result<usize, GenerateError> {
        let entries = self.discover()?;

        if self.dest_dir.exists() {
            fs::remove_dir_all(&self.dest_dir)?;
        }

        entries
            .par_iter()
            .try_for_each_with(progress, |progress, entry| {
                let dest_rel_path = match entry.kind {
                    FileKind::Markup => self.convert_entry(entry)?,
                    FileKind::Other => self.copy_entry(entry)?,
                };
                if let Some(tx) = progress {
                    let _ = tx.send(FileProgress {
                        rel_path: entry.rel_path.clone(),
                        dest_rel_path,
                        kind: entry.kind,
                    });
                }
                Ok::<(), GenerateError>(())
            })?;

        Ok(entries.len())
    }

    /// Walk the source tree and classify every file, destination untouched.
    ///
    /// Directories are never entries; they exist in the output only as
    /// parents of the files that need them. Entries are sorted by relative
    /// path for deterministic listings.
    pub fn discover(&self) -> Result<Vec<FileEntry>, GenerateError> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.source_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let source_path = entry.into_path();
            let rel_path = source_path
                .strip_prefix(&self.source_dir)
                .unwrap()
                .to_path_buf();
            let kind = if source_path.extension().is_some_and(|ext| ext == "md") {
                FileKind::Markup
            } else {
                FileKind::Other
            };
            entries.push(FileEntry {
                source_path,
                rel_path,
                kind,
            });
        }

        entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(entries)
    }

    /// Convert one markdown file to its `.html` counterpart.
    fn convert_entry(&self, entry: &FileEntry) -> Result<PathBuf, GenerateError> {
        let raw = fs::read_to_string(&entry.source_path)?;
        let file_name = entry.source_path.file_name().unwrap().to_string_lossy();
        let page = self.converter.convert(&raw, &file_name);

        let dest_rel_path = entry.rel_path.with_extension("html");
        let dest_path = self.dest_dir.join(&dest_rel_path);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest_path, page)?;
        Ok(dest_rel_path)
    }

    /// Copy one non-markdown file byte-for-byte.
    fn copy_entry(&self, entry: &FileEntry) -> Result<PathBuf, GenerateError> {
        let dest_path = self.dest_dir.join(&entry.rel_path);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&entry.source_path, &dest_path)?;
        Ok(entry.rel_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<!DOCTYPE html>\n<html>\n<head><title>{{TITLE}}</title></head>\n<body>{{BODY}}</body>\n</html>";

    /// Temp workspace: `source/` exists, `target/` does not, template written.
    fn setup() -> (TempDir, PathBuf, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("source");
        let target = tmp.path().join("target");
        let template = tmp.path().join("template.html");
        fs::create_dir_all(&source).unwrap();
        fs::write(&template, TEMPLATE).unwrap();
        (tmp, source, target, template)
    }

    #[test]
    fn construction_succeeds_with_valid_paths() {
        let (_tmp, source, target, template) = setup();

        assert!(Generator::new(&source, &target, &template).is_ok());
    }

    #[test]
    fn missing_source_directory_is_an_error() {
        let (tmp, _, target, template) = setup();
        let missing = tmp.path().join("nonexistent");

        let err = Generator::new(&missing, &target, &template).unwrap_err();
        assert!(matches!(err, GenerateError::SourceMissing(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn missing_template_file_is_an_error() {
        let (tmp, source, target, _) = setup();
        let missing = tmp.path().join("nonexistent-template.html");

        let err = Generator::new(&source, &target, &missing).unwrap_err();
        assert!(matches!(err, GenerateError::TemplateMissing(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn empty_template_file_is_an_error() {
        let (tmp, source, target, _) = setup();
        let empty = tmp.path().join("empty.html");
        fs::write(&empty, "").unwrap();

        let err = Generator::new(&source, &target, &empty).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Convert(ConvertError::EmptyTemplate)
        ));
    }

    #[test]
    fn empty_source_yields_zero_and_no_target_directory() {
        let (_tmp, source, target, template) = setup();

        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(count, 0);
        assert!(!target.exists());
    }

    #[test]
    fn markdown_file_is_converted_to_html() {
        let (_tmp, source, target, template) = setup();
        fs::write(source.join("test.md"), "# Test Note\nThis is a test note.").unwrap();

        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(count, 1);
        let html = fs::read_to_string(target.join("test.html")).unwrap();
        assert!(html.contains("<h1 id=\"test-note\">Test Note</h1>"));
        assert!(html.contains("<p>This is a test note.</p>"));
        assert!(html.contains("<title>test.md</title>"));
    }

    #[test]
    fn other_file_is_copied_verbatim() {
        let (_tmp, source, target, template) = setup();
        let bytes = [0x89u8, 0x50, 0x4E, 0x47];
        fs::write(source.join("image.png"), bytes).unwrap();

        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(fs::read(target.join("image.png")).unwrap(), bytes);
    }

    #[test]
    fn nested_directory_structure_is_preserved() {
        let (_tmp, source, target, template) = setup();
        let nested = source.join("notes").join("projects");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("project1.md"), "# Project Note").unwrap();

        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(count, 1);
        let html =
            fs::read_to_string(target.join("notes").join("projects").join("project1.html"))
                .unwrap();
        assert!(html.contains("<h1 id=\"project-note\">Project Note</h1>"));
    }

    #[test]
    fn mixed_tree_counts_every_file() {
        let (_tmp, source, target, template) = setup();
        fs::write(source.join("note.md"), "# Markdown File").unwrap();
        fs::write(source.join("readme.txt"), "Plain text").unwrap();
        fs::write(source.join("image.png"), [1u8, 2, 3, 4]).unwrap();

        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(count, 3);
        assert!(target.join("note.html").exists());
        assert_eq!(
            fs::read_to_string(target.join("readme.txt")).unwrap(),
            "Plain text"
        );
        assert_eq!(fs::read(target.join("image.png")).unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn uppercase_md_extension_is_copied_not_converted() {
        let (_tmp, source, target, template) = setup();
        fs::write(source.join("SHOUTY.MD"), "# Not converted").unwrap();

        Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert!(target.join("SHOUTY.MD").exists());
        assert!(!target.join("SHOUTY.html").exists());
        assert_eq!(
            fs::read_to_string(target.join("SHOUTY.MD")).unwrap(),
            "# Not converted"
        );
    }

    #[test]
    fn stale_target_files_are_removed() {
        let (_tmp, source, target, template) = setup();
        fs::create_dir_all(&target).unwrap();
        let stale = target.join("existing.txt");
        fs::write(&stale, "should be deleted").unwrap();
        fs::write(source.join("new.md"), "# New File").unwrap();

        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap();

        assert_eq!(count, 1);
        assert!(!stale.exists());
        assert!(target.join("new.html").exists());
    }

    #[test]
    fn discover_classifies_and_relativizes() {
        let (_tmp, source, target, template) = setup();
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("sub").join("note.md"), "# N").unwrap();
        fs::write(source.join("asset.css"), "body {}").unwrap();

        let entries = Generator::new(&source, &target, &template)
            .unwrap()
            .discover()
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rel_path, Path::new("asset.css"));
        assert_eq!(entries[0].kind, FileKind::Other);
        assert_eq!(entries[1].rel_path, Path::new("sub/note.md"));
        assert_eq!(entries[1].kind, FileKind::Markup);
        assert!(!target.exists());
    }

    #[test]
    fn progress_event_sent_per_file() {
        let (_tmp, source, target, template) = setup();
        fs::write(source.join("a.md"), "# A").unwrap();
        fs::write(source.join("b.txt"), "b").unwrap();

        let (tx, rx) = mpsc::channel();
        let count = Generator::new(&source, &target, &template)
            .unwrap()
            .generate_with_progress(Some(tx))
            .unwrap();

        let mut events: Vec<FileProgress> = rx.iter().collect();
        events.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

        assert_eq!(count, 2);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].dest_rel_path, Path::new("a.html"));
        assert_eq!(events[0].kind, FileKind::Markup);
        assert_eq!(events[1].dest_rel_path, Path::new("b.txt"));
        assert_eq!(events[1].kind, FileKind::Other);
    }

    #[test]
    fn unreadable_markdown_aborts_the_run() {
        let (_tmp, source, target, template) = setup();
        // Invalid UTF-8 in a .md file makes read_to_string fail
        fs::write(source.join("broken.md"), [0xFFu8, 0xFE, 0x00]).unwrap();

        let err = Generator::new(&source, &target, &template)
            .unwrap()
            .generate()
            .unwrap_err();

        assert!(matches!(err, GenerateError::Io(_)));
    }
}
