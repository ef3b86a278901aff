use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use fitmind::agents::{build_pipeline, execute_plan_pipeline};
use fitmind::models::PlanRequest;
use fitmind::profile::build_seed_prompt;
use fitmind::utils::init_logger;
use fitmind::{create_router, AppState, Config};

#[derive(Parser)]
#[command(name = "fitmind", version, about = "Gym and nutrition plan generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate one plan from a JSON profile and print it
    Plan {
        #[arg(long)]
        profile: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger();

    let mut config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Plan { profile } => plan_once(config, profile).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let pipeline = build_pipeline(&config)?;
    let state = AppState {
        config: config.clone(),
        pipeline: Arc::new(pipeline),
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("HOST and PORT must form a socket address")?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn plan_once(config: Config, path: PathBuf) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let request: PlanRequest = serde_json::from_str(&raw).context("Invalid profile JSON")?;
    let (profile, bmi) = request.into_profile()?;

    eprintln!("BMI: {} ({})", bmi.bmi(), bmi.category());

    let pipeline = build_pipeline(&config)?;
    let plan = execute_plan_pipeline(
        &pipeline,
        build_seed_prompt(&profile, &bmi),
        &config.agents.plan_marker,
    )
    .await?;

    println!("{}", plan);
    Ok(())
}
