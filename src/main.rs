use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubedigest::{utils, Cli, PipelineConfig, ProcessingPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "tubedigest=debug"
    } else if cli.quiet {
        "tubedigest=warn"
    } else {
        "tubedigest=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Check for required external tools up front; non-fatal since PATH probing
    // can miss tools that still work when invoked
    let missing_deps = utils::check_dependencies().await;
    if !missing_deps.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
        eprintln!("   (Continuing anyway - tools may be available)");
    }

    let config = PipelineConfig::default();
    let pipeline = ProcessingPipeline::new(config)?;

    tracing::info!("Starting processing for URL: {}", cli.url);
    let report = pipeline.run(&cli.url).await?;

    println!("\nProcessing complete!");
    println!("All files organized under videos/{}/", report.title);
    println!("  audio:         {}", report.audio_path.display());
    println!("  transcription: {}", report.transcript_path.display());
    println!("  summary:       {}", report.summary_path.display());
    println!("  ({} transcript segments)", report.segment_count);

    Ok(())
}
