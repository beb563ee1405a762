//! One-shot question to the course assistant.

use anyhow::Result;
use colored::Colorize;
use lectern_core::SessionProvider;

use crate::app::App;
use crate::render;

pub async fn run(app: &App, query: &str) -> Result<()> {
    let reply = match app.assistant.ask(query).await {
        Ok(reply) => reply,
        Err(err) if err.is_auth_required() => {
            eprintln!(
                "{}",
                format!("Sign in first: {}", app.sessions.sign_in_url()).yellow()
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", render::render(&reply.answer));
    if !reply.sources.is_empty() {
        println!();
        println!("{}", "Sources:".bright_black());
        for source in &reply.sources {
            println!("  {}", source.bright_cyan());
        }
    }
    Ok(())
}
