use anyhow::Context;

use support_triage::batch;
use support_triage::config::BatchConfig;
use support_triage::triage::pipeline::TriagePipeline;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    eprintln!("📬 support-triage v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match BatchConfig::from_args(&args)? {
        Some(config) => run_batch_mode(&config),
        None => run_demo(),
    }
}

/// Triage every email in the input file and write flattened results.
fn run_batch_mode(config: &BatchConfig) -> anyhow::Result<()> {
    eprintln!("   Input:  {}", config.input_path.display());
    eprintln!("   Output: {}\n", config.output_path.display());

    let emails = batch::load_emails(&config.input_path)
        .with_context(|| format!("loading {}", config.input_path.display()))?;
    eprintln!("   Loaded {} email(s)", emails.len());

    let mut pipeline = TriagePipeline::new();
    let records = batch::run_batch(&mut pipeline, &emails);

    let escalated = records
        .iter()
        .filter(|r| r.final_action == support_triage::triage::types::FinalAction::EscalateToHuman)
        .count();
    eprintln!(
        "   Triage done: {} auto-handled, {} escalated",
        records.len() - escalated,
        escalated
    );

    batch::write_results(&config.output_path, &records)
        .with_context(|| format!("writing {}", config.output_path.display()))?;
    eprintln!("   Saved {} result(s)", records.len());
    Ok(())
}

/// Run a single sample email and print every pipeline stage.
fn run_demo() -> anyhow::Result<()> {
    let subject = "Issue with my latest invoice";
    let body = "Hi, I noticed an extra charge on my latest bill. \
         This is the third time I am asking about this. \
         Please fix this as soon as possible.";

    eprintln!("   No input file given — running sample email\n");

    let mut pipeline = TriagePipeline::new();
    let result = pipeline.run(subject, body, Some("customer_123"));

    println!("=== CLASSIFICATION ===");
    println!("{}", serde_json::to_string_pretty(&result.classification)?);
    println!("\n=== DECISION ===");
    println!("{}", serde_json::to_string_pretty(&result.decision)?);
    println!("\n=== REPLY ===");
    println!("{}", serde_json::to_string_pretty(&result.reply)?);
    println!("\n=== SUPERVISOR ===");
    println!("{}", serde_json::to_string_pretty(&result.supervisor)?);
    Ok(())
}
