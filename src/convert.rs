//! Markdown-to-page conversion.
//!
//! [`DocConverter`] turns one raw document into one complete HTML page:
//!
//! 1. Front matter is split off ([`crate::frontmatter`]).
//! 2. The body is rendered with [pulldown-cmark](https://docs.rs/pulldown-cmark)
//!    — tables, footnotes, strikethrough, and task lists enabled — and every
//!    heading gets a slugified `id` so same-document anchors are stable.
//! 3. Hyperlink targets ending in `.md` are rewritten to `.html`, so links
//!    between documents in the collection keep working in the generated
//!    site. The rewrite runs over `href` attribute values only; a `.md`
//!    mentioned in prose is left alone.
//! 4. The fragment and the page title are substituted into the page
//!    template at `{{BODY}}` and `{{TITLE}}`.
//!
//! The page title is the front-matter `title` when one is declared,
//! otherwise the document's file name as supplied by the caller. Conversion
//! itself never fails; the only error is an empty template at construction.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use std::collections::HashMap;
use thiserror::Error;

use crate::frontmatter;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("HTML template is empty")]
    EmptyTemplate,
}

/// Converts raw markdown documents into full HTML pages.
///
/// Holds the page template, shared read-only across all conversions — a
/// single converter serves every parallel generation task.
#[derive(Debug)]
pub struct DocConverter {
    template: String,
}

impl DocConverter {
    /// Create a converter from page template text.
    ///
    /// The template should contain `{{TITLE}}` and `{{BODY}}` placeholders;
    /// a missing placeholder is tolerated (that substitution just never
    /// happens). An empty or whitespace-only template is rejected.
    pub fn new(template: &str) -> Result<Self, ConvertError> {
        if template.trim().is_empty() {
            return Err(ConvertError::EmptyTemplate);
        }
        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Convert one document to a complete HTML page.
    ///
    /// `fallback_title` is the document's file name, used as the page title
    /// when the front matter doesn't declare one. Each placeholder is
    /// substituted at its first occurrence only.
    pub fn convert(&self, raw: &str, fallback_title: &str) -> String {
        let (front_matter, body) = frontmatter::extract(raw);
        let body_html = rewrite_doc_links(&render_markdown(body));
        let title = front_matter
            .and_then(|fm| fm.title)
            .unwrap_or_else(|| fallback_title.to_string());

        self.template
            .replacen("{{BODY}}", &body_html, 1)
            .replacen("{{TITLE}}", &title, 1)
    }
}

/// Render a markdown body to an HTML fragment with slugged heading ids.
fn render_markdown(body: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut events: Vec<Event> = Parser::new_ext(body, options).collect();
    assign_heading_ids(&mut events);

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// Give every heading an `id` derived from its text.
///
/// Repeated headings get a numeric suffix (`notes`, `notes-1`, `notes-2`)
/// so ids stay unique within one document.
fn assign_heading_ids(events: &mut [Event]) {
    let mut seen: HashMap<String, u32> = HashMap::new();

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { .. })) {
            continue;
        }

        let mut text = String::new();
        for event in &events[i + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let slug = slugify(&text);
        if slug.is_empty() {
            continue;
        }
        let n = seen.entry(slug.clone()).or_insert(0);
        let id = if *n == 0 { slug } else { format!("{slug}-{n}") };
        *n += 1;

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
            *slot = Some(id.into());
        }
    }
}

/// Lowercase alphanumeric runs joined by single dashes.
///
/// `"Hello World"` → `"hello-world"`, `"Button (Primary)"` → `"button-primary"`.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Rewrite `href` attribute values ending in `.md` to end in `.html`.
///
/// Runs over the rendered fragment, so it covers markdown links and raw
/// inline HTML alike while never touching `.md` in visible text (quotes in
/// text are escaped to `&quot;` by the renderer, so `href="` only occurs
/// inside real tags).
fn rewrite_doc_links(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;

    while let Some(pos) = rest.find("href=\"") {
        let (head, tail) = rest.split_at(pos + "href=\"".len());
        out.push_str(head);

        let Some(end) = tail.find('"') else {
            // Unterminated attribute; emit as-is
            rest = tail;
            break;
        };
        let target = &tail[..end];
        match target.strip_suffix(".md") {
            Some(stem) => {
                out.push_str(stem);
                out.push_str(".html");
            }
            None => out.push_str(target),
        }
        rest = &tail[end..];
    }

    out.push_str(rest);
    out
}
