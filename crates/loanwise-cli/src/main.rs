mod predict;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use loanwise_chat::ChatEndpoint;
use loanwise_web::{ServerConfig, WebServer};
use tracing_subscriber::EnvFilter;

use crate::predict::PredictArgs;

#[derive(Parser)]
#[command(name = "loanwise", version, about = "Loan approval prediction service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web front-end.
    Serve(ServeArgs),
    /// Predict a single application from the command line.
    Predict(PredictArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "LOANWISE_HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "LOANWISE_PORT", default_value_t = 5000)]
    port: u16,

    /// JSON model artifact. The server still starts if it cannot be loaded.
    #[arg(long, env = "LOANWISE_MODEL", default_value = "models/loan_model.json")]
    model: PathBuf,

    #[arg(long, env = "LOANWISE_CHAT_MODEL", default_value = "gemini-2.5-flash")]
    chat_model: String,

    #[arg(
        long,
        env = "LOANWISE_CHAT_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    chat_base_url: String,

    /// Timeout for each outbound chat request.
    #[arg(long, env = "LOANWISE_CHAT_TIMEOUT_SECS", default_value_t = 20)]
    chat_timeout_secs: u64,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            model_path: Some(self.model),
            chat: ChatEndpoint {
                base_url: self.chat_base_url,
                model: self.chat_model,
                // Only ever taken from the environment (or `.env`).
                api_key: std::env::var("GEMINI_API_KEY").ok(),
                timeout: Duration::from_secs(self.chat_timeout_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => {
            tracing::info!("loanwise v{}", env!("CARGO_PKG_VERSION"));
            let server = WebServer::from_config(args.into_config())?;
            server.start().await
        }
        Command::Predict(args) => predict::run(args),
    }
}
