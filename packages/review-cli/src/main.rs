use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use tracing_subscriber::EnvFilter;

use review::ai::OpenAI;
use review::{normalize_url, HttpLoader, ReviewPipeline};

mod output;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let term = Term::stdout();
    print_banner(&term)?;

    let url = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Which product would you like to review? Share a URL (ex: elevenlabs.io)")
            .interact_text()?,
    };
    let url = normalize_url(&url);

    let ai = OpenAI::from_env().context("OPENAI_API_KEY must be set (see .env)")?;
    let pipeline = ReviewPipeline::new(ai.clone(), ai);
    let loader = HttpLoader::new();

    println!();
    println!("{}", "🔄 Generating review...".bright_yellow());

    let doc = pipeline
        .review_url(&loader, &url)
        .await
        .with_context(|| format!("failed to review {}", url))?;

    let html_path = output::save_html(&doc)?;
    let json_path = output::save_json(&doc)?;

    println!();
    println!("{}", "✅ Review complete".bright_green().bold());
    println!("  {} {}", "HTML:".bright_yellow(), html_path.display());
    println!("  {} {}", "JSON:".bright_yellow(), json_path.display());
    println!();
    println!("Open the HTML file in your browser to view the formatted review.");

    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║        Website Review Generator        ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}
