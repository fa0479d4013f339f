use clap::Parser;
use fund_receipt::{
    ConfigError, PartialConfig, ReceiptConfig, ReceiptRenderer, TransactionRecord, TransferStatus,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Render a fund-transfer receipt PDF from a JSON transaction record.
#[derive(Parser, Debug)]
#[command(name = "fund-receipt", version)]
struct Args {
    /// Transaction record as JSON.
    #[arg(long)]
    record: PathBuf,

    /// Resolved transfer status message.
    #[arg(long)]
    status: String,

    /// JSON config file with `outputDir` and/or `logoPath`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory; overrides config and environment.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Logo image or directory holding Companylogo.png; overrides config and
    /// environment.
    #[arg(long)]
    logo: Option<PathBuf>,
}

/// Flags first, then the config file, then the environment, per value.
fn resolve_config(args: &Args) -> Result<ReceiptConfig, ConfigError> {
    let flags = PartialConfig {
        output_dir: args.output_dir.clone(),
        logo_path: args.logo.clone(),
    };
    let file = args
        .config
        .as_ref()
        .map(PartialConfig::from_file)
        .transpose()?
        .unwrap_or_default();
    flags.or(file).or(PartialConfig::from_env()).complete()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    log::info!(
        "Output directory {}, logo {}",
        config.output_dir.display(),
        config.logo_path.display()
    );

    let record: TransactionRecord = serde_json::from_str(&fs::read_to_string(&args.record)?)?;
    let status = TransferStatus::new(args.status);

    let receipt = ReceiptRenderer::new(config).render(&record, &status)?;
    println!("{}", receipt.file_name);
    Ok(())
}
