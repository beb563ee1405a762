use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod render;

use app::App;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Lectern - terminal reading surface for AI-augmented documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a lesson page with mode switching
    Read {
        /// Page path, e.g. /docs/module-1/ros2-nodes
        page: String,
    },
    /// Show the sign-in URL
    Login,
    /// End the current session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Answer onboarding questions to enable personalized mode
    Onboard,
    /// Ask the course assistant a question
    Chat {
        /// The question to ask
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::bootstrap().await?;

    match cli.command {
        Commands::Read { page } => commands::read::run(&app, &page).await?,
        Commands::Login => commands::session::login(&app).await?,
        Commands::Logout => commands::session::logout(&app).await?,
        Commands::Whoami => commands::session::whoami(&app).await?,
        Commands::Onboard => commands::onboard::run(&app).await?,
        Commands::Chat { query } => commands::chat::run(&app, &query).await?,
    }

    Ok(())
}
