use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kumitate::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Generates visual-editor flow documents from plain-language descriptions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, env = "KUMITATE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Component source tree to index (overrides the config file)
    #[arg(long, global = true)]
    components_dir: Option<PathBuf>,

    /// Directory of example flow documents (overrides the config file)
    #[arg(long, global = true)]
    examples_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a flow document
    Generate {
        /// What the flow should do. Prompted for when omitted.
        description: Option<String>,

        /// Use this use case instead of classifying the description
        #[arg(short, long)]
        use_case: Option<String>,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract records from the configured directories and report
    Index {
        /// Also export the extracted index as JSON
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Search the component registry
    Search { query: String },
    /// Print registry and catalog statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let indexing = config.components_dir.is_some() || config.examples_dir.is_some();
    let generator = FlowGenerator::builder(config).build();

    if indexing || matches!(cli.command, Command::Index { .. }) {
        let start = Instant::now();
        let report = generator.reindex();
        eprintln!(
            "Indexed {} components ({} extracted, {} reused) and {} example flows in {:?}; {} artifacts skipped",
            report.components,
            report.extracted,
            report.reused,
            report.examples,
            start.elapsed(),
            report.skipped
        );
    }

    match cli.command {
        Command::Generate {
            description,
            use_case,
            output,
        } => run_generate(&generator, description, use_case, output),
        Command::Index { export } => run_index(&generator, export),
        Command::Search { query } => {
            for record in generator.registry().search(&query) {
                println!(
                    "{:<22} {:<14} {}",
                    record.name, record.category, record.description
                );
            }
            Ok(())
        }
        Command::Stats => {
            let stats = generator.stats();
            println!("Components:     {}", stats.components);
            println!("Example flows:  {}", stats.example_flows);
            println!("Recipes:        {}", stats.recipes);
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(dir) = &cli.components_dir {
        config.components_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.examples_dir {
        config.examples_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run_generate(
    generator: &FlowGenerator,
    description: Option<String>,
    use_case: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let description = match description {
        Some(text) => text,
        None => prompt_for_input("Describe the flow")?,
    };
    let mut request = GenerationRequest::new(description);
    if let Some(label) = use_case {
        request = request.with_use_case(label);
    }

    let start = Instant::now();
    let outcome = generator.generate(&request)?;
    let json = outcome.document.to_json()?;

    match output {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    eprintln!("\n--- Generation Summary ---");
    eprintln!(
        "Use case:    {} (via {})",
        outcome.classification.intent.use_case,
        outcome.classification.source.label()
    );
    eprintln!("Components:  {}", outcome.selection.components.join(" -> "));
    eprintln!(
        "Graph:       {} nodes, {} edges",
        outcome.graph.nodes.len(),
        outcome.graph.edges.len()
    );
    if !outcome.similar_examples.is_empty() {
        eprintln!("Similar:     {}", outcome.similar_examples.join(", "));
    }
    eprintln!("Elapsed:     {:?}", start.elapsed());
    Ok(())
}

fn run_index(generator: &FlowGenerator, export: Option<PathBuf>) -> Result<()> {
    let config = generator.config();
    if config.components_dir.is_none() && config.examples_dir.is_none() {
        bail!("Nothing to index: set components_dir or examples_dir");
    }
    if let Some(path) = export {
        let output = StaticExtractor::new().extract_all(
            config.components_dir.as_deref(),
            config.examples_dir.as_deref(),
        );
        output.to_snapshot().export_json(&path)?;
        eprintln!("Exported index to {}", path.display());
    }
    for (tag, names) in generator.registry().snapshot().use_case_index() {
        println!("{:<32} {}", tag, names.join(", "));
    }
    Ok(())
}

fn prompt_for_input(prompt_text: &str) -> Result<String> {
    let mut line = String::new();
    print!("> {}: ", prompt_text);
    io::stdout().flush()?;
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read line")?;
    Ok(line.trim().to_string())
}
