// src/readme/mod.rs
// =============================================================================
// This module contains the README resolution pipeline.
//
// Submodules:
// - fetch: Finds the README on the repository's raw-content host
// - images: Extracts image references from the README markdown
// - verify: Confirms each referenced image is actually reachable
//
// The three stages are deliberately independent: fetch knows nothing about
// markdown, images knows nothing about the network, and verify consumes
// whatever references it is handed.
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod fetch;
mod images;
mod verify;

// Re-export public items from submodules
// This lets users write `readme::resolve_readme()` instead of
// `readme::fetch::resolve_readme()`
pub use fetch::{raw_content_url, readme_candidate_urls, resolve_readme};
pub use images::extract_markdown_images;
pub use verify::{verify_images, ResolvedImage};
