//! Generates content for a backend template and prints the resulting slide.
//!
//! Reads PITCHDECK_API_URL / PITCHDECK_API_TOKEN (a `.env` file works too).
//! Usage: cargo run --example generate_content -- <template-id> "<company name>" [industry]

use anyhow::Context;
use pitchdeck_tools::models::generation::BusinessProfile;
use pitchdeck_tools::{ClientConfig, DeckApiClient, EditingSession, GenerationOutcome};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut args = env::args().skip(1);
    let template_id = args.next().context("missing template id")?;
    let company_name = args.next().context("missing company name")?;
    let profile = BusinessProfile {
        company_name: Some(company_name),
        industry: args.next(),
        ..Default::default()
    };

    let client = DeckApiClient::new(ClientConfig::from_env()?)?;
    let template = client.get_template(&template_id).await?;
    println!("Template: {} ({})", template.name, template.id);

    let mut session = EditingSession::new(template, None);
    match session.generate_content(&client, Some(&profile)).await {
        GenerationOutcome::Merged { fields } => println!("Filled {} fields", fields),
        other => println!("No content generated: {:?}", other),
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&session.resolve().content)?
    );
    Ok(())
}
