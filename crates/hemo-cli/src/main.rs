mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hemo_lib::{
    analysis::analyze_recording, batch::BatchRunner, config::AnalysisConfig,
    io::recording::read_recording_csv,
};
use render::PngBackend;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "hemo",
    version,
    about = "Cycle-averaged pressure curves and iFR summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every recording below --input, writing plots next to each file
    /// and results.csv into --output
    Process {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Log failing recordings and keep going instead of aborting
        #[arg(long)]
        continue_on_error: bool,
    },
    /// Analyze a single recording and print the result as JSON
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            input,
            output,
            config,
            continue_on_error,
        } => cmd_process(&input, &output, config.as_deref(), continue_on_error)?,
        Commands::Analyze { input, config } => cmd_analyze(&input, config.as_deref())?,
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_toml_file(path),
        None => Ok(AnalysisConfig::default()),
    }
}

fn cmd_process(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    continue_on_error: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    config.continue_on_error |= continue_on_error;
    let mut runner = BatchRunner::new(config, output, PngBackend::default())?;
    let summary = runner.run(input)?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn cmd_analyze(input: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let recording = read_recording_csv(input)?;
    let analysis = analyze_recording(&recording, &config)
        .with_context(|| format!("analyzing {}", input.display()))?;
    println!("{}", serde_json::to_string(&analysis)?);
    Ok(())
}
