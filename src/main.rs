// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the mod catalog and run the requested pipeline
// 3. Print the outcome (human summary or JSON body)
// 4. Exit with proper code (0 = success, 1 = mod not found, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod transport;     // src/transport.rs - the HTTP boundary (trait + reqwest)
mod catalog;       // src/catalog/ - the mod database and slug lookup
mod readme;        // src/readme/ - README resolution pipeline
mod api;           // src/api.rs - response assembly and terminal states
mod history;       // src/history.rs - download history and the downloads page

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser;  // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = request resolved successfully
//   Ok(1) = mod not found
//   Ok(2) = catalog unavailable or internal error
//   Err = unexpected error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    // Each branch handles a different command (mod, downloads)
    match cli.command {
        Commands::Mod { mod_slug, json, host, database_url } => {
            // Run the full README-and-images pipeline
            handle_mod_command(&mod_slug, json, &host, &database_url).await
        }
        Commands::Downloads { mod_slug, json, api_base, database_url } => {
            // Fetch the download-count history for the mod
            handle_downloads_command(&mod_slug, json, &api_base, &database_url).await
        }
    }
}

// Handles the 'mod' subcommand
// Parameters:
//   slug: URL-safe mod identifier (e.g., "nomai-vr")
//   json: whether to output the response body as JSON
//   host: host the request is served for
//   database_url: where the mod database JSON lives
async fn handle_mod_command(
    slug: &str,
    json: bool,
    host: &str,
    database_url: &str,
) -> Result<i32> {
    eprintln!("🔍 Resolving mod: {}", slug);

    let transport = transport::HttpTransport::new()?;

    // Load the catalog up front. A failure here is not fatal yet: the
    // request handler owns the decision that a missing catalog means the
    // server-error outcome
    let catalog = match catalog::fetch_mod_database(&transport, database_url).await {
        Ok(database) => Some(database),
        Err(e) => {
            eprintln!("⚠️  Could not load the mod database: {}", e);
            None
        }
    };

    let response = api::handle_mod_request(&transport, catalog.as_ref(), host, slug).await;

    match response {
        api::ApiResponse::Success(page) => {
            print_mod_page(&page, json)?;
            Ok(0)  // Exit code 0 = resolved
        }
        failure => {
            // NotFound and Unavailable carry an opaque body and a status
            // code; they map onto exit codes 1 and 2 respectively
            if let Some(body) = failure.error_body() {
                eprintln!("❌ {} (HTTP {})", body, failure.status_code());
            }
            match failure {
                api::ApiResponse::NotFound => Ok(1),
                _ => Ok(2),
            }
        }
    }
}

// Handles the 'downloads' subcommand
// Parameters:
//   slug: URL-safe mod identifier (e.g., "nomai-vr")
//   json: whether to output the page data as JSON
//   api_base: base URL of the site API
//   database_url: where the mod database JSON lives
async fn handle_downloads_command(
    slug: &str,
    json: bool,
    api_base: &str,
    database_url: &str,
) -> Result<i32> {
    eprintln!("🔍 Fetching download history for: {}", slug);

    let transport = transport::HttpTransport::new()?;

    // Unlike the mod pipeline, this page cannot even name the mod without
    // the catalog, so a load failure is a hard error (run() maps it to 2)
    let catalog = catalog::fetch_mod_database(&transport, database_url).await?;

    // The loader owns the page semantics: slug lookup, and degrading a
    // failed history fetch to an empty series instead of failing the page
    let page = match history::load_downloads_page(&transport, &catalog, api_base, slug).await {
        Some(page) => page,
        None => {
            eprintln!("❌ Could not find mod {}", slug);
            return Ok(1);  // Exit code 1 = mod not found
        }
    };

    print_download_history(&page, json)?;
    Ok(0)
}

// Prints the resolved mod page either as a human summary or as the JSON body
// Parameters:
//   page: the assembled response envelope
//   json: whether to output JSON format
fn print_mod_page(page: &api::ModPageData, json: bool) -> Result<()> {
    if json {
        // Serialize the response envelope and print
        // (stdout stays pure JSON; progress already went to stderr)
        let json_output = serde_json::to_string_pretty(page)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!("📦 {} ({})", page.mod_info.name, page.mod_info.unique_name);
    println!("   {}", page.mod_info.repo);

    match &page.readme {
        Some(readme) => println!("📄 README resolved ({} bytes)", readme.len()),
        None => println!("⚠️  No README found for this mod"),
    }

    if page.external_images.is_empty() {
        println!("🖼️  No reachable images referenced");
        return Ok(());
    }

    println!("🖼️  {} reachable image(s):\n", page.external_images.len());
    print_image_table(&page.external_images);
    Ok(())
}

// Prints verified images as a human-readable table in the terminal
fn print_image_table(images: &[readme::ResolvedImage]) {
    // Print table header
    println!("{:<40} {:<60}", "ORIGINAL", "RESOLVED");
    println!("{}", "=".repeat(100));

    // Print each surviving reference next to the URL a client can load
    for image in images {
        // Truncate the original reference if too long for display
        let original_display = truncate_reference(&image.original, 37);

        println!("{:<40} {:<60}", original_display, image.resolved);
    }
}

// Truncates text for a fixed-width table cell.
//
// READMEs are UTF-8, so the cut must land on a character boundary; slicing
// at a fixed byte offset would panic mid-character. char_indices() walks
// characters together with their byte offsets, which are always safe to
// slice at.
fn truncate_reference(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// Prints the downloads page either as a table or as the page data JSON
// Parameters:
//   page: the assembled downloads page data
//   json: whether to output JSON format
fn print_download_history(page: &history::DownloadsPageData, json: bool) -> Result<()> {
    if json {
        // Serialize the page data and print
        // (stdout stays pure JSON; progress already went to stderr)
        let json_output = serde_json::to_string_pretty(page)?;
        println!("{}", json_output);
        return Ok(());
    }

    println!("📦 {} ({})", page.mod_info.name, page.mod_info.unique_name);

    let history = &page.mod_download_history;
    if history.is_empty() {
        println!("📈 No download history available");
    } else {
        println!("📈 Download history ({} point(s)):\n", history.len());
        println!("{:<20} {:>12}", "TIMESTAMP", "DOWNLOADS");
        println!("{}", "=".repeat(33));
        for point in history {
            println!("{:<20} {:>12}", point.timestamp, point.value);
        }
    }

    println!();
    println!("📊 Lifetime downloads: {}", page.mod_info.download_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncation_keeps_short_references_untouched() {
        assert_eq!(truncate_reference("./img/logo.png", 37), "./img/logo.png");
    }

    #[test]
    fn test_truncation_shortens_long_references() {
        let long = "a".repeat(50);

        assert_eq!(
            truncate_reference(&long, 37),
            format!("{}...", "a".repeat(37))
        );
    }

    #[test]
    fn test_truncation_respects_character_boundaries() {
        // Byte offset 37 lands inside the three-byte '日'; a byte-indexed
        // slice would panic here
        let reference = format!("{}日本語.png", "a".repeat(36));

        assert_eq!(
            truncate_reference(&reference, 37),
            format!("{}日...", "a".repeat(36))
        );
    }

    #[test]
    fn test_truncation_keeps_exact_length_references() {
        let exact = "b".repeat(37);

        assert_eq!(truncate_reference(&exact, 37), exact);
    }
}
