// src/readme/images.rs
// =============================================================================
// This module extracts image references from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, image, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// We harvest the destination of every image token, exactly as written in
// the source text. No validation and no path resolution happens here; the
// verifier decides later what each reference points at and whether it is
// alive. Text that doesn't form a complete image token is simply not
// matched, which is the right reading for hand-written READMEs.
//
// Rust concepts:
// - impl Trait return types: "some iterator", without naming the exact type
// - filter_map: Transform and filter a stream in one pass
// =============================================================================

use pulldown_cmark::{Event, Parser, Tag};

// Extracts every image reference from Markdown text.
//
// Parameters:
//   markdown: the README text, or None when no README was resolved
//
// Returns: an iterator over the image destinations, in the order they
// appear in the text. Duplicates stay duplicated; relative paths, absolute
// URLs and data URIs all come out exactly as written.
//
// The iterator borrows the input and holds no other state; calling the
// function again rebuilds it, so repeated runs over the same text always
// yield the same sequence.
//
// Example input:
//   "![logo](./img/logo.png) and ![badge](https://img.shields.io/x.svg)"
//
// Example output:
//   ["./img/logo.png", "https://img.shields.io/x.svg"]
pub fn extract_markdown_images(markdown: Option<&str>) -> impl Iterator<Item = String> + '_ {
    // An absent README extracts as an empty sequence, not an error
    Parser::new(markdown.unwrap_or("")).filter_map(|event| match event {
        // In pulldown-cmark 0.9, Image is Tag::Image(link_type, dest_url, title).
        // The destination is complete at the start event; the events up to
        // End(Image) only carry the alt text, which we don't need.
        Event::Start(Tag::Image(_link_type, dest_url, _title)) => Some(dest_url.to_string()),
        _ => None,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `impl Iterator<Item = String> + '_` mean?
//    - "this function returns some type that iterates over Strings"
//    - The caller can use it like any iterator without knowing the type
//    - The `+ '_` ties the iterator's lifetime to the borrowed input text
//
// 2. What is filter_map?
//    - map and filter in one step: return Some(value) to keep, None to skip
//    - Here it turns the parser's event stream into just the image paths
//
// 3. Why Option<&str> for the input?
//    - A mod without a README is an everyday case, not an error
//    - Accepting None here means every caller gets the "empty sequence"
//      behavior for free instead of special-casing it
//
// 4. Why don't links count?
//    - [text](url) produces Tag::Link events, not Tag::Image
//    - Only ![alt](path) tokens reach the match arm we wrote
// -----------------------------------------------------------------------------
