//! Process command - extract fields from a single message.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use focus_core::models::MessageResponse;
use focus_core::{ExtractionResult, FieldCategory};

use super::{build_handler, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Message file, or "-" for stdin
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Message text given inline
    #[arg(short, long)]
    text: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the service response instead of the full extraction result
    #[arg(long)]
    response: bool,

    /// Request identifier echoed in the service response
    #[arg(long)]
    req_id: Option<i64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let message = read_message(&args)?;
    info!("Processing message of {} bytes", message.len());

    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<ExtractionResult> {
        let handler = build_handler(&config)?;
        Ok(handler.process(&message)?)
    })
    .await??;

    let output = if args.response {
        let response = MessageResponse::from_result(args.req_id, result);
        serde_json::to_string_pretty(&response)?
    } else {
        format_result(&result, args.format)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_message(args: &ProcessArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    match &args.input {
        Some(path) if path.as_os_str() == "-" => {
            let mut message = String::new();
            std::io::stdin().read_to_string(&mut message)?;
            Ok(message)
        }
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            Ok(fs::read_to_string(path)?)
        }
        None => anyhow::bail!("Either an input file or --text is required"),
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Template: {} ({})\n", result.template_name, result.template.index()));
    output.push('\n');

    output.push_str("Fields:\n");
    for category in FieldCategory::ALL {
        output.push_str(&format!("  {:<8} {}\n", category.label(), result.fields.get(category)));
    }
    output.push('\n');

    if let Some(topic) = &result.topic {
        output.push_str(&format!("Topic: {} ({:.2})\n", topic.label, topic.score));
    }
    if let Some(subtopic) = &result.subtopic {
        output.push_str(&format!("Subtopic: {} ({:.2})\n", subtopic.label, subtopic.score));
    }

    output.push_str(&format!("Target text: {}\n", result.target_text_clean));

    if !result.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}
