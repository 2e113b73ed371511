use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use prexport::{
    Config, ExportConfig, ExportPipeline, HubProvider, KeywordSet, LocalProvider, RunSummary,
    SecurityClassifier, Storage,
};

#[derive(Parser, Debug)]
#[command(name = "prexport")]
#[command(version)]
#[command(about = "Export AIDev pull request tables and flag security-related PRs")]
struct Args {
    /// Read subsets from <DIR>/<subset>.jsonl instead of the Hugging Face hub
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving task1..task5 CSV files (overrides OUTPUT_DIR)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Dataset name on the hub (overrides DATASET_NAME)
    #[arg(long)]
    dataset: Option<String>,

    /// Dataset split (overrides DATASET_SPLIT)
    #[arg(long)]
    split: Option<String>,

    /// Keyword file, one keyword per line; defaults to the built-in list
    #[arg(short, long)]
    keywords: Option<PathBuf>,

    /// Maximum rows to load per subset
    #[arg(long)]
    limit: Option<usize>,

    /// Summary format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("prexport=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(dataset) = &args.dataset {
        config.dataset = dataset.clone();
    }
    if let Some(split) = &args.split {
        config.split = split.clone();
    }
    config.validate()?;

    let keywords = match &args.keywords {
        Some(path) => KeywordSet::from_file(path)?,
        None => KeywordSet::default(),
    };
    let classifier = SecurityClassifier::new(&keywords)?;

    let storage = Storage::new(&config.output_dir)?;

    let mut export_config = ExportConfig::from(&config);
    export_config.row_limit = args.limit;

    let result = match &args.input_dir {
        Some(dir) => {
            let pipeline =
                ExportPipeline::new(LocalProvider::new(dir), classifier, storage, export_config);
            pipeline.run().await
        }
        None => {
            let pipeline =
                ExportPipeline::new(HubProvider::new(&config)?, classifier, storage, export_config);
            pipeline.run().await
        }
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) if e.is_source_error() => {
            tracing::error!("Dataset source failed, no exports after the failing task were written");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    output_summary(&summary, &args)?;

    Ok(())
}

fn output_summary(summary: &RunSummary, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(summary)?,
        _ => format_text(summary),
    };
    println!("{}", output);
    Ok(())
}

fn format_text(summary: &RunSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Task 1: pull requests      {:>8} rows\n",
        summary.pull_requests
    ));
    output.push_str(&format!(
        "Task 2: repositories       {:>8} rows\n",
        summary.repositories
    ));
    output.push_str(&format!(
        "Task 3: PR task types      {:>8} rows\n",
        summary.task_types
    ));
    output.push_str(&format!(
        "Task 4: PR commit details  {:>8} rows\n",
        summary.commit_details
    ));
    output.push_str(&format!(
        "Task 5: security analysis  {:>8} rows\n",
        summary.annotations
    ));
    output.push_str(&format!(
        "  Security flagged: {} PRs\n",
        summary.security_flagged
    ));

    if let Some(completed_at) = summary.completed_at {
        output.push_str(&format!(
            "\nCompleted on: {}\n",
            completed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
