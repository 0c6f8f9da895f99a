mod config;
mod db;
mod error;
mod toolcall;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "taskvoice-server",
    about = "Tool-call backend for voice assistants: todos, reminders and calendar entries"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Create the database schema if absent, then exit
    InitDb,

    /// Print the tool definitions to register with the assistant platform
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::InitDb => cmd_init_db().await,
        Commands::Tools => cmd_tools(),
    }
}

/// Start the tool-call HTTP server.
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(database_url = %config.database_url, "Starting tool-call server");

    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("Database initialized");

    let app = toolcall::router(pool);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Bootstrap the schema.
async fn cmd_init_db() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;
    db::init_pool(&config.database_url).await?;
    println!("Database ready at {}", config.database_url);
    Ok(())
}

/// Print all tool definitions as JSON.
fn cmd_tools() -> anyhow::Result<()> {
    let tools = toolcall::tools::tools_json();
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
