// src/readme/verify.rs
// =============================================================================
// This module confirms that referenced images actually exist before they
// are handed to a client.
//
// READMEs in third-party repositories reference images that moved, were
// renamed, or never existed; serving those references means broken image
// tags on the mod page. So each reference is:
//
// 1. Classified: already-absolute URLs are kept as-is, anything else is
//    joined onto the repository's raw-content base URL
// 2. Probed: a HEAD request confirms the target answers with a success
//    status
// 3. Kept or dropped: only references whose probe succeeded are returned,
//    still in the order they appeared in the README
//
// A dropped image is normal operation, not an error, and the batch never
// fails as a whole: whatever subset survives is the answer.
//
// Rust concepts:
// - Streams with buffer_unordered: bounded concurrent fan-out
// - Vec<Option<T>>: positional slots so completion order can't reorder output
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::transport::Transport;

// How many probes run at once within a single README.
//
// Why 16? READMEs rarely reference more than a handful of images, and most
// targets share one host; 16 keeps the fan-out flat for the image-heavy
// READMEs without hammering anyone.
const MAX_CONCURRENT_PROBES: usize = 16;

// An image reference that passed its reachability check.
//
// `original` is the reference exactly as written in the README; `resolved`
// is the absolute URL a client can actually load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedImage {
    pub original: String,
    pub resolved: String,
}

// Rewrites one reference into the URL we will probe.
//
// Already-absolute references (anything with a scheme, which includes data
// URIs) pass through untouched. Everything else is treated as a path inside
// the repository: leading "./" segments are stripped, a leading "/" is
// dropped, and the remainder is joined onto the raw-content base URL with a
// single separator.
//
// Examples (base = "https://raw.host/owner/repo/HEAD"):
//   "./img/logo.png"    -> "https://raw.host/owner/repo/HEAD/img/logo.png"
//   "img/logo.png"      -> "https://raw.host/owner/repo/HEAD/img/logo.png"
//   "/img/logo.png"     -> "https://raw.host/owner/repo/HEAD/img/logo.png"
//   "https://cdn/x.png" -> "https://cdn/x.png"
fn resolve_image_url(raw_content_url: &str, reference: &str) -> String {
    // Url::parse succeeds only for absolute URLs (there is no base to join
    // against), which is exactly the classification we need here
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }

    let mut path = reference;
    while let Some(stripped) = path.strip_prefix("./") {
        path = stripped;
    }
    let path = path.trim_start_matches('/');

    format!("{}/{}", raw_content_url.trim_end_matches('/'), path)
}

// Verifies a batch of image references concurrently.
//
// Parameters:
//   transport: the HTTP boundary
//   host: the host the incoming request is served for. Threaded through for
//         check strategies that rewrite relative to the serving host; the
//         current strategy does not consult it (the request handler logs it)
//   raw_content_url: base URL for resolving relative references
//   mod_name: the mod's display name, used in the summary line
//   references: image references in README order
//
// Returns: the surviving references paired with their resolved URLs, in the
// same relative order they were given. Probes run concurrently, but every
// result lands in a slot indexed by its original position, so completion
// order can never reorder the output.
pub async fn verify_images<T: Transport>(
    transport: &T,
    _host: &str,
    raw_content_url: &str,
    mod_name: &str,
    references: Vec<String>,
) -> Vec<ResolvedImage> {
    let total = references.len();

    // One future per reference, each remembering its original position
    let probes = references.into_iter().enumerate().map(|(index, original)| {
        let resolved = resolve_image_url(raw_content_url, &original);
        async move {
            let reachable = transport.probe(&resolved).await;
            (index, original, resolved, reachable)
        }
    });

    // Run up to MAX_CONCURRENT_PROBES at once. Results arrive in completion
    // order, so they are written into position-indexed slots and compacted
    // afterwards.
    let mut slots: Vec<Option<ResolvedImage>> = vec![None; total];
    let mut checks = stream::iter(probes).buffer_unordered(MAX_CONCURRENT_PROBES);

    while let Some((index, original, resolved, reachable)) = checks.next().await {
        if reachable {
            slots[index] = Some(ResolvedImage { original, resolved });
        }
        // Unreachable references are dropped without a trace: a broken image
        // link in someone else's README is expected, not exceptional
    }

    let images: Vec<ResolvedImage> = slots.into_iter().flatten().collect();

    eprintln!(
        "  {}/{} referenced image(s) verified for {}",
        images.len(),
        total,
        mod_name
    );

    images
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - It takes a stream of futures and keeps up to N of them running
//    - Results come out as they finish, which is why the slot vector exists:
//      the finish order tells us nothing about the README order
//
// 2. Why Vec<Option<ResolvedImage>> instead of pushing to a Vec?
//    - Each future carries its index, and its result is written to that slot
//    - After the fan-in, .flatten() drops the Nones (failed probes) while
//      the survivors keep their README positions relative to each other
//
// 3. Why is the host parameter unused?
//    - The signature accepts the serving host so a future strategy can
//      rewrite image URLs relative to it (for example, to proxy them)
//    - The underscore prefix tells the compiler the non-use is deliberate
// -----------------------------------------------------------------------------
