//! # Remarq
//!
//! A minimal static site generator for markdown note collections. Your
//! filesystem is the data source: point Remarq at a directory of notes, a
//! target directory, and an HTML template, and it mirrors the tree —
//! markdown becomes styled pages, everything else is copied as-is.
//!
//! # Architecture: One Pass, Three Layers
//!
//! ```text
//! Generator     source/  →  target/     (walk, classify, dispatch, rebuild)
//!   DocConverter    .md  →  .html       (front matter + markdown + template)
//!     frontmatter   head of document →  (title, body)
//! ```
//!
//! The [`generate::Generator`] walks the source tree once, deletes the
//! target tree, and fans each file out as an independent parallel task:
//! `.md` files go through the [`convert::DocConverter`], everything else is
//! a byte copy. The converter splits off [`frontmatter`], renders the body,
//! rewrites intra-collection `.md` links to `.html`, and fills the page
//! template.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Directory walk, classification, full-rebuild parallel dispatch |
//! | [`convert`] | Markdown → complete HTML page via the `{{TITLE}}`/`{{BODY}}` template |
//! | [`frontmatter`] | Optional `---`-delimited metadata block at the head of a document |
//! | [`output`] | CLI output formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Full Rebuild Over Incremental
//!
//! The target tree is deleted and regenerated on every run. Note
//! collections are small enough that diffing buys nothing, and a full
//! rebuild has one property worth keeping: the output is always exactly a
//! function of the current source tree. Stale pages cannot linger.
//!
//! ## Runtime Template Over Compile-Time HTML
//!
//! The page shell is a user-supplied file with `{{TITLE}}` and `{{BODY}}`
//! placeholders, loaded once per run. Users restyle their site by editing
//! one HTML file, with no rebuild of the tool and nothing to learn beyond
//! two tokens.
//!
//! ## Task-Per-File Parallelism
//!
//! Every file operation is independent — fixed destination path, no
//! cross-file data — so the generator hands the whole list to rayon and
//! joins. The first failure aborts the run; there is no retry and no
//! rollback of files already written.

pub mod convert;
pub mod frontmatter;
pub mod generate;
pub mod output;
