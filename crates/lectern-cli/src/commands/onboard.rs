//! Onboarding prompts.
//!
//! Collects the learner profile, submits it, and switches the transform
//! cache to the fresh personalization context.

use anyhow::Result;
use colored::Colorize;
use lectern_core::{LearnerProfile, Proficiency, SessionProvider};
use rustyline::DefaultEditor;
use std::str::FromStr;

use crate::app::App;

fn ask_proficiency(rl: &mut DefaultEditor, prompt: &str) -> Result<Proficiency> {
    loop {
        let line = rl.readline(&format!(
            "{prompt} [beginner/intermediate/advanced]: "
        ))?;
        match Proficiency::from_str(line.trim()) {
            Ok(level) => return Ok(level),
            Err(_) => println!(
                "{}",
                "Please answer beginner, intermediate or advanced.".yellow()
            ),
        }
    }
}

pub async fn run(app: &App) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let programming = ask_proficiency(&mut rl, "Programming proficiency")?;
    let ai = ask_proficiency(&mut rl, "AI proficiency")?;
    let hardware = loop {
        let line = rl.readline("Hardware (machine, GPU, robot kit): ")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            break trimmed.to_string();
        }
        println!("{}", "Hardware info must not be empty.".yellow());
    };

    let profile = LearnerProfile {
        programming_proficiency: programming,
        ai_proficiency: ai,
        hardware_info: hardware,
    };

    match app.onboarding.complete(profile.clone()).await {
        Ok(()) => {
            app.cache.set_context(Some(profile.context_line()));
            println!("{}", "Profile saved. Personalized mode is ready.".green());
            Ok(())
        }
        Err(err) if err.is_auth_required() => {
            eprintln!(
                "{}",
                format!("Sign in first: {}", app.sessions.sign_in_url()).yellow()
            );
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
