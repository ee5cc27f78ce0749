// src/main.rs
// =============================================================================
// Entry point of the page-analyzer CLI.
//
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, filtered by RUST_LOG)
// 3. Analyze the page and print the result
// 4. Exit with proper code (0 = no broken links, 1 = broken links, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use page_analyzer::{analyze, CrawlResult};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays machine-readable
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("page_analyzer=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<i32> {
    let result = analyze(&cli.url)
        .await
        .with_context(|| format!("could not analyze {}", cli.url))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&cli.url, &result);
    }

    Ok(if result.broken_link_count() > 0 { 1 } else { 0 })
}

fn print_report(url: &str, result: &CrawlResult) {
    let headings = result.headings();

    println!("📄 {}", url);
    println!("{}", "=".repeat(80));
    println!("{:<20} {}", "Title", result.title());
    println!("{:<20} {}", "HTML version", result.html_version());
    let heading_line: Vec<String> = (1..=6)
        .filter_map(|level| headings.level(level).map(|count| format!("h{level}={count}")))
        .collect();
    println!("{:<20} {}", "Headings", heading_line.join(" "));
    println!(
        "{:<20} {}",
        "Login form",
        if result.has_login_form() { "yes" } else { "no" }
    );
    println!("{:<20} {}", "Internal links", result.internal_link_count());
    println!("{:<20} {}", "External links", result.external_link_count());
    println!();

    if result.broken_links().is_empty() {
        println!("✅ No broken links");
        return;
    }

    println!("{:<70} {:<10}", "BROKEN LINK", "STATUS");
    println!("{}", "=".repeat(80));
    for broken in result.broken_links() {
        // Truncate URL if too long for display
        let link = if broken.link.chars().count() > 67 {
            format!("{}...", broken.link.chars().take(67).collect::<String>())
        } else {
            broken.link.clone()
        };
        let status = if broken.status == 0 {
            "no reply".to_string()
        } else {
            broken.status.to_string()
        };
        println!("{:<70} {:<10}", link, status);
    }

    println!();
    println!("❌ Broken: {}", result.broken_link_count());
}
