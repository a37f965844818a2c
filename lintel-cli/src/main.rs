//! Lintel CLI
//!
//! Validates HTML documents and prints positioned diagnostics.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lintel_common::warning::warn_once;
use lintel_html::{
    ErrorReport, ParseError, initialize_extra_validations, load_named_entities_from_json, parse,
};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Lintel: error-tolerant HTML validator
#[derive(Parser, Debug)]
#[command(name = "lintel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Validate files
    lintel index.html about.html

    # Validate an inline snippet and show its parse tree
    lintel --tree --html '<div><span>unclosed</div>'

    # Machine-readable output
    lintel --json index.html

    # Check entity names against a local entities.json
    lintel --entities entities.json index.html
"#)]
struct Cli {
    /// HTML files to validate
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Validate this HTML string instead of (or in addition to) files
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the debug parse tree of each input
    #[arg(long)]
    tree: bool,

    /// Print diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Load named entities from a WHATWG entities.json file
    #[arg(long, value_name = "PATH", conflicts_with = "no_entities")]
    entities: Option<PathBuf>,

    /// Skip named entity validation
    #[arg(long)]
    no_entities: bool,
}

/// Diagnostics for one input, as printed by `--json`.
#[derive(Debug, Serialize)]
struct InputReport {
    input: String,
    errors: Vec<ErrorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    install_entity_table(&cli)?;

    let inputs = load_inputs(&cli)?;
    if inputs.is_empty() {
        anyhow::bail!("Nothing to validate: pass one or more FILES or --html");
    }

    let reports: Vec<InputReport> = inputs
        .iter()
        .map(|(name, html)| check(name, html, cli.tree))
        .collect();
    let error_count: usize = reports.iter().map(|r| r.errors.len()).sum();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
        print_summary(reports.len(), error_count);
    }

    if error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Install the entity table selected on the command line
fn install_entity_table(cli: &Cli) -> Result<()> {
    if cli.no_entities {
        let _ = warn_once("Entities", "named entity validation disabled by --no-entities");
        return Ok(());
    }
    if let Some(ref path) = cli.entities {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read entity table {}", path.display()))?;
        let _ = load_named_entities_from_json(&json)
            .with_context(|| format!("Invalid entity table {}", path.display()))?;
    } else {
        let _ = initialize_extra_validations();
    }
    Ok(())
}

/// Read every input as (display name, contents)
fn load_inputs(cli: &Cli) -> Result<Vec<(String, String)>> {
    let mut inputs = Vec::new();
    if let Some(ref html) = cli.html {
        inputs.push(("<html>".to_string(), html.clone()));
    }
    for path in &cli.files {
        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        inputs.push((path.display().to_string(), html));
    }
    Ok(inputs)
}

/// Parse one input and collect its diagnostics
fn check(name: &str, html: &str, with_tree: bool) -> InputReport {
    let tree = parse(html);
    let errors = tree
        .errors(tree.root())
        .into_iter()
        .filter_map(ParseError::report)
        .collect();
    InputReport {
        input: name.to_string(),
        errors,
        tree: with_tree.then(|| tree.to_string()),
    }
}

fn print_report(report: &InputReport) {
    if let Some(ref tree) = report.tree {
        println!("{} {}", "===".dimmed(), report.input.bold());
        println!("{tree}");
    }
    for error in &report.errors {
        println!(
            "{}:{}:{}: {} {}",
            report.input.bold(),
            error.line,
            error.column,
            "error:".red().bold(),
            error.message
        );
    }
}

fn print_summary(inputs: usize, errors: usize) {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    let summary = format!(
        "{errors} error{} in {inputs} input{}",
        plural(errors),
        plural(inputs)
    );
    if errors == 0 {
        eprintln!("{}", summary.green());
    } else {
        eprintln!("{}", summary.red());
    }
}
