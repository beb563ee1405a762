//! Session commands: login, logout, whoami.
//!
//! Sign-in is a browser redirect flow owned by the auth provider; the CLI
//! hands out the URL and verifies the result.

use anyhow::Result;
use colored::Colorize;
use lectern_core::{SessionProvider, SessionState};

use crate::app::App;

pub async fn login(app: &App) -> Result<()> {
    match app.sessions.current().await? {
        SessionState::Authenticated(session) => {
            println!(
                "{}",
                format!("Already signed in as {}", session.email).green()
            );
        }
        _ => {
            println!("Sign in in your browser, then run `lectern whoami`:");
            println!("{}", app.sessions.sign_in_url().bright_cyan());
        }
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.sessions.sign_out().await?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    match app.sessions.current().await? {
        SessionState::Authenticated(session) => {
            let name = session.display_name.as_deref().unwrap_or("(no name)");
            println!("{} <{}>", name.bold(), session.email);
            if let Some(expires_at) = &session.expires_at {
                println!("{}", format!("session expires {expires_at}").bright_black());
            }
        }
        SessionState::Anonymous => {
            println!("{}", "Not signed in.".yellow());
        }
        SessionState::Pending => {
            // current() resolves before returning, so this only shows up
            // if the provider could not decide either way.
            println!("{}", "Session state could not be resolved.".yellow());
        }
    }
    Ok(())
}
