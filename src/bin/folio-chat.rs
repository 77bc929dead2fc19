//! Terminal front-end for a portfolio chat endpoint.
//!
//! Plays the greeting, then posts each line typed to the endpoint and prints
//! the reply.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a local endpoint
//! folio-chat
//!
//! # Talk to a deployed endpoint that expects {"message": ...}
//! folio-chat --endpoint https://example.com/api/chat --payload-field message
//!
//! # Load greeting copy and tuning from YAML, logging traffic to stderr
//! folio-chat --config folio.yaml --verbose
//! ```
//!
//! # Commands
//!
//! - `/help` - Show available commands
//! - `/stats` - Show session statistics
//! - `/history` - Print the conversation so far
//! - `/quit` - Exit the application

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc::unbounded_channel;

use folio_chat::chat::{ChatCommand, help_text, parse_command};
use folio_chat::render::markup_to_text;
use folio_chat::{
    ChatArgs, ChatConfig, ChatSession, ChatWidget, HttpTransport, Platform, StderrLogger,
    TerminalSurface, TokioScheduler, WidgetEvent,
};

/// Main entry point for the folio-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("folio-chat [OPTIONS]");
    let verbose = args.verbose;
    let config = ChatConfig::try_from(args)?;

    let transport = HttpTransport::with_options(&config.endpoint, Some(config.request_timeout()))?;
    let (events_tx, mut events_rx) = unbounded_channel::<WidgetEvent>();
    let surface = TerminalSurface::with_color(config.use_color);
    let scheduler = TokioScheduler::new(events_tx.clone());

    println!("Chatting with {}", transport.endpoint());
    println!("Type /help for commands, /quit to exit\n");

    let mut widget = ChatWidget::new(
        config,
        &Platform::desktop(),
        surface,
        scheduler,
        Arc::new(transport),
        events_tx,
    )?;
    if verbose {
        widget = widget.with_logger(Arc::new(StderrLogger));
    }
    widget.start();
    widget.run_until_idle(&mut events_rx).await;

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Stats => print_stats(widget.session()),
                        ChatCommand::History => print_history(widget.session()),
                        ChatCommand::Invalid(message) => eprintln!("{message}"),
                    }
                    continue;
                }

                widget.handle_event(WidgetEvent::Submit(line.to_string()));
                widget.run_until_idle(&mut events_rx).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Input error: {}", err);
                break;
            }
        }
    }

    widget.teardown();
    Ok(())
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Questions: {} ({} answered, {} failed)",
        stats.total_requests, stats.answered, stats.failed
    );
    println!("      Forced timeouts: {}", stats.forced_timeouts);
    println!("      Late replies dropped: {}", stats.stale_settlements);
}

fn print_history(session: &ChatSession) {
    for message in session.messages() {
        let who = if message.is_user { "You" } else { "Bot" };
        let text = if message.is_html {
            markup_to_text(&message.text)
        } else {
            message.text.clone()
        };
        println!("    {who}: {text}");
    }
}
