// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// Where the published mod database lives when no --database-url is given.
// The database is one JSON document regenerated by CI, so fetching it
// straight off the raw-content host is the normal way to consume it.
const DEFAULT_DATABASE_URL: &str =
    "https://raw.githubusercontent.com/ow-mods/ow-mod-db/master/database.json";

// Where the site API lives when no --api-base is given.
const DEFAULT_API_BASE: &str = "https://outerwildsmods.com";

// The host a request is served for when no --host is given.
const DEFAULT_HOST: &str = "outerwildsmods.com";

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "readme-resolver",
    version = "0.1.0",
    about = "A CLI tool to resolve mod READMEs and verify their embedded images",
    long_about = "readme-resolver looks a mod up in the published mod database, finds its README \
                  on the repository's raw-content host, and keeps only the referenced images \
                  that are actually reachable. It can also fetch a mod's download-count history."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (mod, downloads)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a mod's README and its reachable images
    ///
    /// Example: readme-resolver mod nomai-vr
    Mod {
        /// Mod slug: the URL-safe form of its display name (e.g., "nomai-vr")
        ///
        /// This is a positional argument (required, no flag needed)
        mod_slug: String,

        /// Output the response body in JSON format instead of a summary
        ///
        /// This is an optional flag: --json
        /// #[arg(long)] creates a flag from the field name
        #[arg(long)]
        json: bool,

        /// Host the request is served for
        ///
        /// Threaded through to the image verifier; reserved for check
        /// strategies that rewrite image URLs relative to the serving host
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// URL of the mod database JSON document
        #[arg(long, default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },

    /// Fetch a mod's download-count history
    ///
    /// Example: readme-resolver downloads nomai-vr --json
    Downloads {
        /// Mod slug: the URL-safe form of its display name (e.g., "nomai-vr")
        ///
        /// This is a positional argument (required)
        mod_slug: String,

        /// Output the history in JSON format instead of a table
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,

        /// Base URL of the site API serving /api/{uniqueName}/downloads
        #[arg(long, default_value = DEFAULT_API_BASE)]
        api_base: String,

        /// URL of the mod database JSON document
        #[arg(long, default_value = DEFAULT_DATABASE_URL)]
        database_url: String,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why use structs and enums?
//    - Structs group related data (like the CLI arguments)
//    - Enums represent choices (like "mod OR downloads")
//    - Both are core Rust types for organizing data
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What does 'pub' mean?
//    - pub = public, meaning other modules can use this
//    - Without pub, items are private to this module
//
// 4. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because we need to own the CLI arguments
//
// 5. Why do the URL flags have default values?
//    - The tool should work out of the box against the production database
//    - Defaults keep the common invocation short: readme-resolver mod nomai-vr
//    - Tests and local setups can still point every URL somewhere else
// -----------------------------------------------------------------------------
