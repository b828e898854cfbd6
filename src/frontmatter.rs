//! Front-matter extraction for markdown documents.
//!
//! A document may open with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: My Note
//! date: 2025-09-03
//! ---
//! body...
//! ```
//!
//! Only `title` is recognized (case-insensitive key, trimmed value); every
//! other key is parsed and discarded. Malformed blocks are not errors — a
//! document that opens with `---` but never closes the block is passed
//! through unchanged, stray marker included. [`extract`] is total over all
//! string inputs.

/// Metadata declared at the top of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
}

/// Split a document into its front matter and body.
///
/// Returns `(None, content)` when the document has no front matter, which
/// covers three cases: no opening `---\n` at all, an opening marker that is
/// never closed, and anything before the opening marker.
///
/// The closing `\n---\n` is searched for from byte offset 4 so the opening
/// marker's characters are never reused. The one input that defeats that
/// search is `---\n---\n` — the two markers overlap at the fourth byte — so
/// back-to-back markers are matched explicitly and yield an empty block.
pub fn extract(content: &str) -> (Option<FrontMatter>, &str) {
    if !content.starts_with("---\n") {
        return (None, content);
    }

    match content[4..].find("\n---\n") {
        Some(pos) => {
            let end = 4 + pos;
            let block = &content[4..end];
            // Skip the closing marker and the newlines on either side of it
            (Some(parse_block(block)), &content[end + 5..])
        }
        None if content.starts_with("---\n---\n") => {
            (Some(FrontMatter::default()), &content[8..])
        }
        None => (None, content),
    }
}

/// Parse the key/value lines between the markers.
///
/// Lines split at the first `:`; lines without one are skipped. A later
/// `title` line overwrites an earlier one.
fn parse_block(block: &str) -> FrontMatter {
    let mut title = None;

    for line in block.split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("title") {
            title = Some(value.trim().to_string());
        }
    }

    FrontMatter { title }
}
