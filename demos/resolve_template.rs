//! Resolves a template against a form state read from disk and prints the slide content.
//!
//! Usage: cargo run --example resolve_template -- template.json [form.json]

use anyhow::Context;
use pitchdeck_tools::{initialize, markdown::deck_to_markdown, resolve_template, FormState, Slide, Template};
use std::{env, fs};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let template_path = args
        .next()
        .context("usage: resolve_template <template.json> [form.json]")?;
    let template: Template = serde_json::from_str(
        &fs::read_to_string(&template_path).with_context(|| format!("reading {}", template_path))?,
    )
    .with_context(|| format!("parsing {}", template_path))?;

    let form: FormState = match args.next() {
        Some(path) => serde_json::from_str(
            &fs::read_to_string(&path).with_context(|| format!("reading {}", path))?,
        )
        .with_context(|| format!("parsing {}", path))?,
        None => initialize(&template, None),
    };

    let resolution = resolve_template(&template, &form, None);
    println!("--- Content ---");
    println!("{}", serde_json::to_string_pretty(&resolution.content)?);
    println!("--- Positions ---");
    println!("{}", serde_json::to_string_pretty(&resolution.positioned_elements)?);

    let slide = Slide {
        id: "preview".to_string(),
        template_id: Some(template.id.clone()),
        content: resolution.content,
        positioned_elements: resolution.positioned_elements,
        ..Default::default()
    };
    println!("--- Outline ---");
    println!("{}", deck_to_markdown(Some(template.name.as_str()), &[slide]));
    Ok(())
}
