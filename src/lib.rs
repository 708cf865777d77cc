pub mod app;
pub mod cli;
pub mod client;
pub mod coaching;
pub mod config;
pub mod error;
pub mod providers;
pub mod shaping;

use anyhow::Result;
use clap::Parser;

pub use client::{AiClient, AiConfig};
pub use coaching::Coach;
pub use error::{AdapterResult, AiError};
pub use shaping::{Difficulty, Gig, GigProposal, GigStatus, Language, TaskShaper};

pub async fn run() -> Result<()> {
    let cli = cli::Cli::parse();

    let mut config = config::TangiraConfig::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }

    let app = app::Application::new(config)?;

    match cli.command {
        cli::Command::Shape { description, language, post } => {
            print!("{}", app.shape(&description, language, post).await);
        }
        cli::Command::Coach { message } => {
            println!("{}", app.ask(&message).await);
        }
        cli::Command::Chat { name } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            app.chat(&name, stdin, tokio::io::stdout()).await?;
        }
        cli::Command::Config => {
            print!("{}", app.describe_config()?);
        }
    }

    Ok(())
}
