// src/catalog/mod.rs
// =============================================================================
// This module owns the mod catalog: the published database document that
// lists every released mod together with its repository location.
//
// Currently implements:
// - The Mod record and the database document around it
// - Slug projection (display name -> URL-safe path segment)
// - Lookup by slug
// - Fetching and parsing the database JSON from its remote host
//
// The rest of the application treats the catalog as read-only: it is loaded
// once per run and only queried afterwards.
// =============================================================================

mod database;

// Re-export the public API from database.rs
// (mod_path_name stays internal: lookups go through find_by_slug)
pub use database::{fetch_mod_database, Mod, ModDatabase};
