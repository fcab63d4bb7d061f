use std::path::PathBuf;
use std::process;

use clap::Parser;

use faceenroll_server::{create_router, AppState, FaceStore, ServerConfig};

#[derive(Parser)]
#[command(
    name = "faceenroll-server",
    about = "Stores enrolled face captures posted to /save-face"
)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Directory that receives <fileName>.jpg
    #[arg(long, default_value = "faces")]
    faces_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        faces_dir: cli.faces_dir,
        ..ServerConfig::default()
    };

    if let Err(e) = run(config).await {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = FaceStore::open(&config.faces_dir)
        .map_err(|e| format!("cannot create {}: {e}", config.faces_dir.display()))?;
    log::info!("Saving faces to {}", store.dir().display());

    let app = create_router(AppState::new(store), &config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| format!("cannot bind {}:{}: {e}", config.host, config.port))?;
    let addr = listener.local_addr()?;
    log::info!("Server is running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
