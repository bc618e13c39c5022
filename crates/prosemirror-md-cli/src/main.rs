//! pm2md - convert ProseMirror JSON to Markdown

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use prosemirror_md::{preview, Document, MarkdownService, Options};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pm2md")]
#[command(version)]
#[command(about = "Convert ProseMirror JSON documents to Markdown", long_about = None)]
struct Cli {
    /// Input JSON file (use '-' or omit for stdin)
    input: Option<PathBuf>,

    /// Treat the input as a document envelope, or an array of them
    #[arg(long)]
    envelope: bool,

    /// Print rendered envelopes as JSON records (requires --envelope)
    #[arg(long, requires = "envelope")]
    json: bool,

    /// Truncate each Markdown output to at most N characters
    #[arg(long, value_name = "N")]
    max_chars: Option<usize>,

    /// Bullet list marker
    #[arg(long)]
    bullet_marker: Option<char>,

    /// Emphasis delimiter
    #[arg(long)]
    em_delimiter: Option<char>,

    /// Strong delimiter
    #[arg(long)]
    strong_delimiter: Option<String>,

    /// Code block fence
    #[arg(long)]
    fence: Option<String>,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options::default();

        if let Some(marker) = self.bullet_marker {
            options.bullet_list_marker = marker;
        }
        if let Some(delim) = self.em_delimiter {
            options.em_delimiter = delim;
        }
        if let Some(delim) = &self.strong_delimiter {
            options.strong_delimiter = delim.clone();
        }
        if let Some(fence) = &self.fence {
            options.fence = fence.clone();
        }

        options
    }

    fn truncate<'a>(&self, markdown: &'a str) -> &'a str {
        match self.max_chars {
            Some(max) => preview(markdown, max),
            None => markdown,
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn parse_documents(value: &Value) -> Vec<Document> {
    match value {
        Value::Array(items) => items.iter().map(Document::from).collect(),
        other => vec![Document::from(other)],
    }
}

fn run(cli: &Cli) -> Result<String> {
    let service = MarkdownService::with_options(cli.options());
    let raw = read_input(cli.input.as_ref())?;
    let value: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

    if !cli.envelope {
        let markdown = service.convert_value(&value);
        return Ok(cli.truncate(&markdown).to_string());
    }

    let documents = parse_documents(&value);
    tracing::info!(count = documents.len(), "rendering documents");

    let mut rendered = Vec::with_capacity(documents.len());
    for document in &documents {
        let mut record = document.render(&service);
        if !record.has_content {
            tracing::debug!(id = ?record.id, "document has no content");
        }
        record.markdown = cli.truncate(&record.markdown).to_string();
        rendered.push(record);
    }

    if cli.json {
        return Ok(serde_json::to_string_pretty(&rendered)?);
    }

    let sections: Vec<String> = rendered
        .iter()
        .map(|doc| format!("# {}\n\n{}", doc.title, doc.markdown).trim_end().to_string())
        .collect();
    Ok(sections.join("\n\n"))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pm2md=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}
