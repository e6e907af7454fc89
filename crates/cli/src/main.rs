use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use artifacts::ArtifactBundle;
use pipeline::InferencePipeline;
use server::AppState;

/// churn-serve - Customer churn prediction service
#[derive(Parser)]
#[command(name = "churn-serve")]
#[command(about = "Serve churn predictions from a pre-trained model", long_about = None)]
struct Cli {
    /// Path to the artifact directory (encoders.json, scaler.json, model.json)
    #[arg(short, long, default_value = "model")]
    artifact_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP prediction server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },

    /// Classify rows from a JSON file without starting the server
    Predict {
        /// File containing {"features": <row> | [<row>, ...]}
        #[arg(long)]
        input: PathBuf,
    },

    /// Show a summary of the loaded artifacts
    Inspect,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load artifacts once; everything downstream shares them read-only
    println!("Loading artifacts from {}...", cli.artifact_dir.display());
    let start = Instant::now();
    let bundle = Arc::new(
        ArtifactBundle::load_from_dir(&cli.artifact_dir)
            .context("Failed to load model artifacts")?,
    );
    println!("{} Loaded artifacts in {:?}", "✓".green(), start.elapsed());
    info!(
        "Artifact summary: {} encoders, {} model",
        bundle.encoders.len(),
        bundle.model.kind()
    );

    match cli.command {
        Commands::Serve { addr } => handle_serve(bundle, addr).await?,
        Commands::Predict { input } => handle_predict(bundle, input)?,
        Commands::Inspect => handle_inspect(&bundle),
    }

    Ok(())
}

/// Handle the 'serve' command
async fn handle_serve(bundle: Arc<ArtifactBundle>, addr: SocketAddr) -> Result<()> {
    let pipeline = Arc::new(InferencePipeline::new(bundle));
    println!(
        "{} Serving {} model on http://{}",
        "✓".green(),
        pipeline.model_name(),
        addr
    );
    server::run(AppState::new(pipeline), addr).await
}

/// Handle the 'predict' command
fn handle_predict(bundle: Arc<ArtifactBundle>, input: PathBuf) -> Result<()> {
    let text = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let body: serde_json::Value =
        serde_json::from_str(&text).context("Input file is not valid JSON")?;

    let pipeline = InferencePipeline::new(bundle);
    let outcome = pipeline
        .predict_value(&body)
        .context("Prediction failed")?;

    for (i, label) in outcome.predictions.iter().enumerate() {
        let colored_label = if label == pipeline::LABEL_CHURN {
            label.red().bold()
        } else {
            label.green()
        };
        match outcome.probabilities.as_ref().map(|p| p[i]) {
            Some(p) => println!("{:>4}. {} (p = {:.3})", i + 1, colored_label, p),
            None => println!("{:>4}. {}", i + 1, colored_label),
        }
    }
    Ok(())
}

/// Handle the 'inspect' command
fn handle_inspect(bundle: &ArtifactBundle) {
    println!("{}", "Schema".bold());
    println!(
        "  {} columns ({} categorical, {} numeric)",
        artifacts::FEATURE_COUNT,
        bundle.encoders.len(),
        artifacts::NUMERIC_COLUMNS.len()
    );

    println!("{}", "Encoders".bold());
    for column in artifacts::schema::categorical_columns() {
        if let Some(encoder) = bundle.encoders.get(column) {
            println!("  {:<18} {:?}", column, encoder.classes());
        }
    }

    println!("{}", "Scaler".bold());
    println!("  standardization over {:?}", bundle.scaler.columns());

    println!("{}", "Model".bold());
    println!("  kind: {}", bundle.model.kind());
    println!("  coefficients: {}", bundle.model.coefficients().len());
}
