// src/api.rs
// =============================================================================
// This module assembles the mod page response.
//
// It is the orchestration layer: the pieces (catalog lookup, README
// resolution, image extraction, image verification) live in their own
// modules, and this file runs them in order and decides which terminal
// state the request reaches:
//
//   Unavailable (500) - the catalog itself could not be loaded
//   NotFound    (404) - no mod projects onto the requested slug
//   Success     (200) - page data, whether or not a README exists
//
// Only the first two are error-shaped. A mod without a README, or a README
// whose images are all dead, still resolves successfully; the response
// just carries less.
//
// Rust concepts:
// - Enums with payloads: terminal states that carry their data
// - Option<&T>: "the catalog may not have loaded" as a type, not a flag
// - serde attributes: skip_serializing_if for the optional readme field
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::catalog::{Mod, ModDatabase};
use crate::readme::{
    extract_markdown_images, raw_content_url, readme_candidate_urls, resolve_readme,
    verify_images, ResolvedImage,
};
use crate::transport::Transport;

// The response envelope for a resolved mod page.
//
// Serialized shape (camelCase keys, the shape the page consumes):
//   { "readme": "...", "externalImages": [ ... ], "mod": { ... } }
//
// When no README candidate resolved, the "readme" key disappears from the
// JSON entirely; the page tells "no README" by absence, never by null or
// an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModPageData {
    /// Raw markdown of the first README candidate that answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Referenced images that passed their reachability probe, in README order
    pub external_images: Vec<ResolvedImage>,
    /// The catalog entry the slug resolved to
    /// (the field is called mod_info because `mod` is a Rust keyword)
    #[serde(rename = "mod")]
    pub mod_info: Mod,
}

// Every terminal state a mod page request can reach.
//
// The wire layer (whatever serves HTTP) maps these onto real responses;
// this binary maps them onto exit codes instead.
#[derive(Debug, PartialEq)]
pub enum ApiResponse {
    /// 200: the assembled page data
    Success(ModPageData),
    /// 404: no mod's display name projects onto the requested slug
    NotFound,
    /// 500: the catalog could not be retrieved at all
    Unavailable,
}

impl ApiResponse {
    /// The HTTP-equivalent status code for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiResponse::Success(_) => 200,
            ApiResponse::NotFound => 404,
            ApiResponse::Unavailable => 500,
        }
    }

    /// The opaque error body for the failure outcomes.
    /// Success carries its data in the variant instead.
    pub fn error_body(&self) -> Option<&'static str> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::NotFound => Some("Mod not found"),
            ApiResponse::Unavailable => Some("Failed to retrieve database"),
        }
    }
}

// Resolves one mod page request from start to finish.
//
// Parameters:
//   transport: the HTTP boundary
//   catalog: the loaded mod database, or None when loading it failed
//   host: host the incoming request is served for (logged here, threaded
//         through to the verifier)
//   slug: URL-safe mod identifier from the request path
//
// The order of the early exits is part of the contract: an unavailable
// catalog wins over any slug, and an unknown slug returns before a single
// README or image fetch is attempted.
pub async fn handle_mod_request<T: Transport>(
    transport: &T,
    catalog: Option<&ModDatabase>,
    host: &str,
    slug: &str,
) -> ApiResponse {
    // The serving host is part of the request context; its only effect for
    // now is this log line (see verify_images for where it may matter)
    eprintln!("Request host: {}", host);

    let catalog = match catalog {
        Some(catalog) => catalog,
        None => return ApiResponse::Unavailable,
    };

    let mod_entry = match catalog.find_by_slug(slug) {
        Some(entry) => entry,
        None => return ApiResponse::NotFound,
    };

    // From here on nothing is fatal: a mod without a README, or without a
    // single reachable image, still resolves to a successful page
    let raw_content_url = raw_content_url(&mod_entry.repo);
    let candidates = readme_candidate_urls(&raw_content_url);
    let readme = resolve_readme(transport, &candidates).await;

    let references: Vec<String> = extract_markdown_images(readme.as_deref()).collect();
    let external_images = verify_images(
        transport,
        host,
        &raw_content_url,
        &mod_entry.name,
        references,
    )
    .await;

    ApiResponse::Success(ModPageData {
        readme,
        external_images,
        mod_info: mod_entry.clone(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<&ModDatabase> instead of fetching the catalog here?
//    - Loading the catalog is the collaborator's job (main.rs does it once
//      per run); this handler only decides what its absence means
//    - Tests hand in None to reach the Unavailable path with zero network
//
// 2. Why an enum instead of Result for the outcome?
//    - NotFound is an everyday outcome, not an exception, and Success
//      carries data; a three-state enum says exactly that
//    - status_code() maps the states onto their HTTP-equivalent codes
//
// 3. Why return early with match instead of using ? on Options?
//    - The two early exits map onto DIFFERENT terminal states, so each
//      needs its own arm; ? would collapse them into one
// -----------------------------------------------------------------------------
