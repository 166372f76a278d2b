//! `create-lcs schema` command handler

use anyhow::{Context, Result};
use console::style;
use lcs_core::{derive_prompts, materialize, Answers, SchemaNode};

use crate::cli::SchemaArgs;
use crate::output;

/// List the prompts a schema derives, optionally materializing answers
pub fn run(args: SchemaArgs) -> Result<()> {
    let schema = SchemaNode::from_file(&args.file)
        .with_context(|| format!("Failed to load schema {}", args.file))?;

    output::header(schema.title.as_deref().unwrap_or("Configuration schema"));
    if let Some(description) = &schema.description {
        println!("{}", description);
    }

    let prompts = derive_prompts(&schema);
    if prompts.is_empty() {
        output::info("No configuration questions found in schema.");
    }

    for (index, prompt) in prompts.iter().enumerate() {
        println!("\n{:>3}. {}", index + 1, style(&prompt.path).bold());
        output::kv("Label", &prompt.label);
        output::kv("Kind", prompt.kind.name());
        output::kv("Initial", &prompt.initial.to_string());
        if let Some(validator) = &prompt.validator {
            output::kv("Validator", &validator.to_string());
        }
    }

    if let Some(path) = &args.answers {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers {}", path))?;
        let answers = Answers::from_json_str(&content)
            .with_context(|| format!("Failed to parse answers {}", path))?;

        let config = materialize(&answers, &schema);
        output::header("Configuration");
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
