use anyhow::Result;
use clap::Parser;

use backend_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "dewana-checkin")]
#[command(about = "Dewana guest check-in service", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Also write JSON logs, rotated daily, into this directory (overrides `log_dir`)
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = &args.config {
        std::env::set_var("DEWANA_CONFIG", config);
    }

    let config = AppConfig::load().await?;
    let log_dir = config.effective_log_dir(args.log_dir.as_deref());
    let _log_guard = backend_bootstrap::logging::init(log_dir.as_deref());

    backend_bootstrap::run_standalone(config).await
}
