use anyhow::Result;
use clap::{Parser, Subcommand};
use mini_gen::config::{FrontendConfig, TextgenConfig};
use mini_gen::{frontend, textgen};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "mini-gen")]
#[command(about = "Prompt form and word-limited text generation services")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the browser-facing prompt form.
    Frontend {
        /// Address to listen on, overriding FRONTEND_BIND.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Serve the text generation API.
    Textgen {
        /// Address to listen on, overriding TEXTGEN_BIND.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_gen=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let outcome = match args.command {
        Command::Frontend { bind } => {
            info!("Starting mini-gen frontend");
            let mut config = FrontendConfig::from_env()?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            frontend::serve(config).await
        }
        Command::Textgen { bind } => {
            info!("Starting mini-gen textgen");
            let mut config = TextgenConfig::from_env()?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            textgen::serve(config).await
        }
    };

    if let Err(e) = outcome {
        error!("Service failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
