use clap::Parser;
use swapdesk::config::Config;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "swapdesk", about = "Conversational token-swap assistant")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[cfg(feature = "telegram")]
#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        }
    } else {
        Config::from_env()
    };

    config.init_logging();
    info!("swapdesk starting");

    tokio::select! {
        result = swapdesk::app::App::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("swapdesk stopped");
}

#[cfg(not(feature = "telegram"))]
fn main() {
    let _ = Cli::parse();
    eprintln!("swapdesk was built without the `telegram` feature; no transport available");
    std::process::exit(1);
}
