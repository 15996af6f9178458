// src/catalog/database.rs
// =============================================================================
// The mod database document and how we read it.
//
// The database is a single JSON file published on a raw-content host:
//
//   {
//     "releases": [
//       { "name": "...", "uniqueName": "...", "repo": "https://github.com/...",
//         "downloadCount": 1234, ... }
//     ]
//   }
//
// Keys are camelCase and entries carry more fields than we need; serde
// ignores the extras, so the document can keep growing without breaking us.
//
// Rust concepts:
// - serde derive: JSON (de)serialization generated from struct definitions
// - #[serde(rename_all = "camelCase")]: Maps snake_case fields to JSON keys
// - Iterators: find() for the slug lookup
// =============================================================================

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::transport::Transport;

// One released mod, as listed in the database.
//
// Only the fields the resolver needs are declared; everything else in the
// document is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    /// Display name, e.g. "Nomai VR"
    pub name: String,
    /// Stable identifier, e.g. "Raicuparta.NomaiVR"
    pub unique_name: String,
    /// Repository URL, e.g. "https://github.com/Raicuparta/nomai-vr"
    pub repo: String,
    /// Lifetime download total (shown in the downloads summary)
    #[serde(default)]
    pub download_count: u64,
}

// The whole database document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModDatabase {
    pub releases: Vec<Mod>,
}

impl ModDatabase {
    // Looks up the mod whose display name projects to the given slug.
    //
    // The catalog holds a few hundred entries, so a linear scan does the job.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Mod> {
        self.releases
            .iter()
            .find(|entry| mod_path_name(&entry.name) == slug)
    }
}

// Projects a display name onto its URL-safe slug.
//
// Example: "Nomai VR" -> "nomai-vr"
//
// Lowercase, with every run of whitespace collapsed to a single hyphen.
// The projection must stay stable: it is the public identifier for a mod.
pub fn mod_path_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

// Fetches and parses the database document.
//
// Parameters:
//   transport: the HTTP boundary
//   url: where the database JSON lives
//
// Returns: the parsed database, or an error when the fetch or the parse
// failed. The caller decides what a missing database means; for the mod
// resolution flow it is the server-error outcome.
pub async fn fetch_mod_database<T: Transport>(transport: &T, url: &str) -> Result<ModDatabase> {
    let body = transport.fetch_text(url).await?;
    let database: ModDatabase = serde_json::from_str(&body)?;
    Ok(database)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why declare only four fields on Mod?
//    - serde's deserializer skips JSON keys that have no matching field
//    - We stay compatible with database changes we don't care about
//    - Serializing a Mod back out writes only what we declared
//
// 2. What does #[serde(default)] do?
//    - If the key is missing in the JSON, the field gets Default::default()
//    - For u64 that is 0, which is the right reading for "no downloads yet"
//
// 3. Why does find_by_slug project every name instead of storing slugs?
//    - The database document doesn't contain slugs, only display names
//    - Projecting during the scan keeps the document the single source of
//      truth and avoids a second, cached list that could drift
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fakes::FakeTransport;

    fn sample_database() -> ModDatabase {
        ModDatabase {
            releases: vec![
                Mod {
                    name: "Nomai VR".to_string(),
                    unique_name: "Raicuparta.NomaiVR".to_string(),
                    repo: "https://github.com/Raicuparta/nomai-vr".to_string(),
                    download_count: 9000,
                },
                Mod {
                    name: "Quantum Space Buddy".to_string(),
                    unique_name: "Nick.QSB".to_string(),
                    repo: "https://github.com/misternebula/quantum-space-buddies".to_string(),
                    download_count: 4500,
                },
            ],
        }
    }

    #[test]
    fn test_mod_path_name_lowercases_and_hyphenates() {
        assert_eq!(mod_path_name("Nomai VR"), "nomai-vr");
    }

    #[test]
    fn test_mod_path_name_collapses_whitespace() {
        assert_eq!(mod_path_name("  Quantum   Space  Buddy "), "quantum-space-buddy");
    }

    #[test]
    fn test_mod_path_name_keeps_single_words() {
        assert_eq!(mod_path_name("OWML"), "owml");
    }

    #[test]
    fn test_find_by_slug_matches_projected_name() {
        let database = sample_database();
        let found = database.find_by_slug("quantum-space-buddy").unwrap();
        assert_eq!(found.unique_name, "Nick.QSB");
    }

    #[test]
    fn test_find_by_slug_misses_unknown_slug() {
        let database = sample_database();
        assert!(database.find_by_slug("no-such-mod").is_none());
    }

    #[test]
    fn test_parse_ignores_unknown_fields_and_defaults_missing_count() {
        let json = r#"{
            "releases": [
                {
                    "name": "Test Mod",
                    "uniqueName": "author.TestMod",
                    "repo": "https://github.com/author/test-mod",
                    "version": "1.2.3",
                    "required": false
                }
            ],
            "alphas": []
        }"#;

        let database: ModDatabase = serde_json::from_str(json).unwrap();
        assert_eq!(database.releases.len(), 1);
        assert_eq!(database.releases[0].unique_name, "author.TestMod");
        assert_eq!(database.releases[0].download_count, 0);
    }

    #[tokio::test]
    async fn test_fetch_mod_database_parses_document() {
        let url = "https://example.com/database.json";
        let json = r#"{
            "releases": [
                {
                    "name": "Test Mod",
                    "uniqueName": "author.TestMod",
                    "repo": "https://github.com/author/test-mod",
                    "downloadCount": 77
                }
            ]
        }"#;
        let transport = FakeTransport::new().with_page(url, json);

        let database = fetch_mod_database(&transport, url).await.unwrap();
        assert_eq!(database.releases[0].download_count, 77);
    }

    #[tokio::test]
    async fn test_fetch_mod_database_propagates_fetch_failure() {
        let transport = FakeTransport::new();
        let result = fetch_mod_database(&transport, "https://example.com/database.json").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_mod_database_propagates_parse_failure() {
        let url = "https://example.com/database.json";
        let transport = FakeTransport::new().with_page(url, "not json at all");
        let result = fetch_mod_database(&transport, url).await;
        assert!(result.is_err());
    }
}
