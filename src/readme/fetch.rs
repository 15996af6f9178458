// src/readme/fetch.rs
// =============================================================================
// This module locates a mod's README on its repository's raw-content host.
//
// Strategy:
// - Build the raw-content base URL from the repository URL by swapping the
//   host (github.com -> raw.githubusercontent.com) and pinning the HEAD ref,
//   so the default branch is used whatever it happens to be called
// - Try the known README filename spellings one after another
// - The first candidate that answers successfully wins; if none do, the mod
//   simply has no README we can show
//
// The candidate order is fixed on purpose. Racing the spellings in parallel
// could return an arbitrary one when a repository carries several, and a
// README fetch is cheap enough that trying them in order costs little.
// =============================================================================

use crate::transport::Transport;

// README filename spellings seen in the wild, in the order we try them.
pub const README_NAMES: [&str; 3] = ["README.md", "readme.md", "Readme.md"];

// Builds the base URL under which a repository's files are fetchable as
// plain text.
//
// Example:
//   "https://github.com/Raicuparta/nomai-vr"
//   -> "https://raw.githubusercontent.com/Raicuparta/nomai-vr/HEAD"
//
// The HEAD ref resolves to the repository's default branch on the raw
// host, which avoids guessing between "main" and "master".
pub fn raw_content_url(repo: &str) -> String {
    let mut repo = repo.trim_end_matches('/');

    // Some database entries point at clone URLs
    if repo.ends_with(".git") {
        repo = repo.trim_end_matches(".git");
    }

    format!(
        "{}/HEAD",
        repo.replacen("github.com", "raw.githubusercontent.com", 1)
    )
}

// Builds the full candidate URL list for a raw-content base URL.
//
// Example (base = ".../nomai-vr/HEAD"):
//   [".../HEAD/README.md", ".../HEAD/readme.md", ".../HEAD/Readme.md"]
pub fn readme_candidate_urls(raw_content_url: &str) -> Vec<String> {
    README_NAMES
        .iter()
        .map(|name| format!("{}/{}", raw_content_url.trim_end_matches('/'), name))
        .collect()
}

// Fetches the first candidate that answers successfully.
//
// Parameters:
//   transport: the HTTP boundary
//   candidate_urls: absolute URLs to try, strictly in order
//
// Returns: Some(markdown) from the first successful fetch, or None when
// every candidate failed (or the list was empty). A missing README is a
// normal outcome, not an error: plenty of mods ship without one, and the
// response just omits it.
pub async fn resolve_readme<T: Transport>(
    transport: &T,
    candidate_urls: &[String],
) -> Option<String> {
    for url in candidate_urls {
        // First success short-circuits the rest of the chain; a failed
        // candidate (bad status or transport error) moves us to the next
        if let Ok(text) = transport.fetch_text(url).await {
            return Some(text);
        }
    }

    None
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why three spellings of the same filename?
//    - Repository file systems are case sensitive, and authors disagree
//    - "README.md" is by far the most common, so it goes first
//    - The order is part of the observable behavior: when a repository has
//      two spellings, the earlier one in this list always wins
//
// 2. Why not fetch the candidates concurrently?
//    - This is a fallback chain, not a race
//    - Sequential tries keep "which README wins" deterministic
//
// 3. Why Option instead of Result for resolve_readme?
//    - There is nothing to report beyond "no candidate answered"
//    - Callers only branch on presence, so Option says exactly that
// -----------------------------------------------------------------------------
