//! Profile a text file.
//!
//! Usage: `cargo run --example profile -- <path> [--csv]`
//!
//! Credentials and service URL come from `PERSONALITY_INSIGHTS_*` environment variables.
//! Set `RUST_LOG=personality_insights_async=debug` to see request logging.

use anyhow::Context;
use personality_insights_async::{
    Client,
    types::{Content, ContentItem, ProfileOptions},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: profile <path> [--csv]")?;
    let csv = args.next().is_some_and(|a| a == "--csv");

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let client = Client::new();

    if csv {
        let options = ProfileOptions::from_text(text).with_csv_headers(true);
        let stream = client.profile().create_csv(options).await?;
        println!("{}", stream.text().await?);
        return Ok(());
    }

    let options = ProfileOptions::from_content(Content::new(vec![ContentItem::new(text)]))
        .with_consumption_preferences(true);
    let profile = client.profile().create(options).await?;

    println!(
        "{} words analyzed ({})",
        profile.word_count, profile.processed_language
    );
    for t in profile
        .personality
        .iter()
        .chain(&profile.needs)
        .chain(&profile.values)
    {
        println!("{:<28} {:>5.1}%", t.name, t.percentile * 100.0);
    }
    for w in &profile.warnings {
        println!("warning: {}", w.message);
    }

    Ok(())
}
