//! Interactive reading loop.
//!
//! Shows a lesson page and lets the reader switch between the original
//! text and its transformed renditions. Mode requests go through the
//! controller; the loop reacts to what comes back over the signal bus,
//! the same way any other renderer would.

use anyhow::Result;
use colored::Colorize;
use lectern_application::ModeView;
use lectern_core::{ContentMode, ContentSource, PageId, SessionProvider, SourceContent};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app::App;
use crate::render;

fn print_help() {
    println!(
        "{}",
        "Commands: :summary :translate :personalize :original :help :quit".bright_black()
    );
}

fn parse_mode(input: &str) -> Option<ContentMode> {
    match input {
        ":original" => Some(ContentMode::Original),
        ":summary" => Some(ContentMode::Summary),
        ":translate" => Some(ContentMode::Translation),
        ":personalize" => Some(ContentMode::Personalized),
        _ => None,
    }
}

async fn apply_mode(
    app: &App,
    view: &mut ModeView,
    page: &PageId,
    source: &SourceContent,
    mode: ContentMode,
) {
    if mode.is_original() {
        view.show_original();
        println!("{}", render::render(source.as_str()));
        return;
    }

    view.start_loading(mode);
    println!("{}", format!("Fetching {}...", mode.title()).bright_black());

    match app.cache.get_or_fetch(mode, source, page).await {
        Ok(text) => {
            view.complete(page, mode, text);
            if let Some(text) = view.display_text() {
                println!("{}", format!("--- {} ---", mode.title()).bright_magenta());
                println!("{}", render::render(text));
            }
        }
        Err(err) => {
            view.fail(page, mode, err);
            // Keep the controller in step with the revert so the same
            // command retries instead of toggling off.
            app.controller.report_failure(mode).await;
            if let Some(reason) = view.take_failure() {
                eprintln!("{}", format!("{reason}").red());
                if reason.is_retryable() {
                    eprintln!("{}", "You can retry the same command.".bright_black());
                }
            }
            // Back on the original rendition after the failure.
            println!("{}", render::render(source.as_str()));
        }
    }
}

pub async fn run(app: &App, page_path: &str) -> Result<()> {
    let page = PageId::new(page_path);
    let source = app.content.load(&page).await?;

    app.controller.navigate(page.clone()).await;
    app.cache.begin_page(page.clone());
    let mut signals = app.bus.subscribe();

    let mut view = ModeView::new(page.clone());
    view.begin_page(page.clone(), source.clone());

    println!("{}", format!("=== {} ===", page).bright_magenta().bold());
    println!("{}", render::render(source.as_str()));
    println!();
    print_help();

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("lectern> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed == ":quit" || trimmed == "quit" || trimmed == "exit" {
                    break;
                }
                if trimmed == ":help" {
                    print_help();
                    continue;
                }

                let Some(requested) = parse_mode(trimmed) else {
                    println!("{}", "Unknown command".bright_black());
                    print_help();
                    continue;
                };

                match app.controller.request_mode(requested).await {
                    Ok(_) => {
                        // The accepted change arrives over the bus.
                        if let Ok(change) = signals.recv().await {
                            apply_mode(app, &mut view, &page, &source, change.mode).await;
                        }
                    }
                    Err(err) if err.is_auth_required() => {
                        eprintln!(
                            "{}",
                            format!(
                                "Sign in to use {}: {}",
                                requested.title(),
                                app.sessions.sign_in_url()
                            )
                            .yellow()
                        );
                        // The gate may have pushed the surface back.
                        while let Ok(change) = signals.try_recv() {
                            apply_mode(app, &mut view, &page, &source, change.mode).await;
                        }
                    }
                    Err(err) if err.is_session_pending() => {
                        eprintln!(
                            "{}",
                            "Still checking your session, try again in a moment.".yellow()
                        );
                    }
                    Err(err) => eprintln!("{}", format!("{err}").red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type ':quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_commands_parse() {
        assert_eq!(parse_mode(":summary"), Some(ContentMode::Summary));
        assert_eq!(parse_mode(":translate"), Some(ContentMode::Translation));
        assert_eq!(parse_mode(":personalize"), Some(ContentMode::Personalized));
        assert_eq!(parse_mode(":original"), Some(ContentMode::Original));
        assert_eq!(parse_mode(":bogus"), None);
    }
}
