//! Interactive chat application for an agent service.
//!
//! This binary provides a REPL for opening sessions on the agent service,
//! switching between them, and exchanging messages (with file names
//! attached) in the active one.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a service on localhost:8000
//! sindhu-chat
//!
//! # Point at another service
//! sindhu-chat --url http://agents.internal:9000
//!
//! # Disable colors (useful for piping output)
//! sindhu-chat --no-color
//! ```
//!
//! Plain text is sent with any attached files; `/send` sends files on
//! their own.
//!
//! Replies are awaited in the background: you can switch or create sessions
//! while the agent is thinking, and the reply is filed under the session the
//! question was asked in.

use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::thread;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use sindhu::chat::{
    ChatArgs, ChatCommand, ChatConfig, PlainTextRenderer, Renderer, format_attachments,
    format_session_list, help_text, parse_command,
};
use sindhu::{AgentClient, Attachment, Controller, SendCompletion};

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "SINDHU_LOG";

/// What the line reader thread hands to the event loop.
enum Input {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

/// Main entry point for the sindhu-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("sindhu-chat [OPTIONS]");
    init_tracing();
    let config = ChatConfig::from(args);

    let client = config.client()?;
    let mut controller = Controller::new(client).with_timeout(config.timeout);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let editor = DefaultEditor::new()?;

    let (input_tx, mut inputs) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = std_mpsc::channel();
    thread::spawn(move || read_lines(editor, input_tx, ready_rx));
    let (done_tx, mut completions) = mpsc::unbounded_channel::<SendCompletion>();

    println!("Agent Chat ({})", controller.service().base_url());
    println!("Type /new to start a session, /help for commands\n");
    let _ = ready_tx.send(());

    loop {
        tokio::select! {
            input = inputs.recv() => {
                let line = match input {
                    Some(Input::Line(line)) => line,
                    Some(Input::Interrupted) => {
                        // Ctrl+C at prompt - soft interrupt
                        println!();
                        let _ = ready_tx.send(());
                        continue;
                    }
                    Some(Input::Eof) | None => {
                        println!("\nGoodbye!");
                        break;
                    }
                    Some(Input::Failed(err)) => {
                        renderer.print_error(&format!("Input error: {}", err));
                        break;
                    }
                };

                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Send => start_send(&mut controller, &mut renderer, &done_tx),
                        cmd => run_command(cmd, &mut controller, &mut renderer).await,
                    }
                } else {
                    controller.set_text(line);
                    start_send(&mut controller, &mut renderer, &done_tx);
                }
                for notification in controller.take_notifications() {
                    renderer.print_notification(&notification);
                }
                let _ = ready_tx.send(());
            }
            Some(completion) = completions.recv() => {
                let target = completion.ticket().session_id().clone();
                if let Some(reply) = controller.complete_send(completion) {
                    if controller.store().active() == Some(&target) {
                        println!();
                        renderer.print_message(&reply);
                    } else {
                        renderer.print_info(&format!(
                            "\nNew reply in session {}",
                            controller.store().title(&target)
                        ));
                    }
                }
                for notification in controller.take_notifications() {
                    renderer.print_notification(&notification);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads one line per readiness signal so the prompt never races output.
fn read_lines(
    mut editor: DefaultEditor,
    inputs: mpsc::UnboundedSender<Input>,
    ready: std_mpsc::Receiver<()>,
) {
    while ready.recv().is_ok() {
        let input = match editor.readline("You: ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    Input::Interrupted
                } else {
                    let _ = editor.add_history_entry(line.as_str());
                    Input::Line(line)
                }
            }
            Err(ReadlineError::Interrupted) => Input::Interrupted,
            Err(ReadlineError::Eof) => Input::Eof,
            Err(err) => Input::Failed(err.to_string()),
        };
        let last = matches!(input, Input::Eof | Input::Failed(_));
        if inputs.send(input).is_err() || last {
            break;
        }
    }
}

fn start_send(
    controller: &mut Controller<AgentClient>,
    renderer: &mut PlainTextRenderer,
    done: &mpsc::UnboundedSender<SendCompletion>,
) {
    match controller.begin_send() {
        Some(ticket) => {
            renderer.print_busy();
            let in_flight = controller.dispatch(ticket);
            let done = done.clone();
            tokio::spawn(async move {
                let _ = done.send(in_flight.await);
            });
        }
        None if controller.is_pending() => {
            renderer.print_info("Still waiting for the previous reply.");
        }
        None if controller.store().active().is_none() => {
            renderer.print_info("No session selected. Use /new or /switch first.");
        }
        None => {
            renderer.print_info("Nothing to send. Type a message or /attach a file first.");
        }
    }
}

async fn run_command(
    cmd: ChatCommand,
    controller: &mut Controller<AgentClient>,
    renderer: &mut PlainTextRenderer,
) {
    match cmd {
        ChatCommand::New => {
            if let Some(session_id) = controller.create_session().await {
                renderer.print_info(&format!("Session: {session_id}"));
            }
        }
        ChatCommand::Sessions => {
            renderer.print_info(&format_session_list(controller.store()));
        }
        ChatCommand::Switch(selector) => match controller.store().resolve(&selector) {
            Some(session_id) => match controller.select_session(&session_id) {
                Ok(()) => {
                    let pending = controller.is_active_pending();
                    renderer.print_transcript(controller.store(), pending);
                }
                Err(err) => renderer.print_error(&err.to_string()),
            },
            None => renderer.print_error(&format!("No session matches {selector:?}")),
        },
        ChatCommand::Delete(selector) => match controller.store().resolve(&selector) {
            Some(session_id) => {
                if controller.delete_session(&session_id).await {
                    renderer.print_info(&format!("Deleted session {session_id}"));
                }
            }
            None => renderer.print_error(&format!("No session matches {selector:?}")),
        },
        ChatCommand::Attach(paths) => {
            let mut picked = Vec::new();
            for path in paths {
                let path = PathBuf::from(path);
                match tokio::fs::metadata(&path).await {
                    Ok(meta) if meta.is_file() => picked.push(Attachment::from_path(&path)),
                    Ok(_) => renderer.print_error(&format!("{} is not a file", path.display())),
                    Err(err) => renderer.print_error(&format!("{}: {}", path.display(), err)),
                }
            }
            controller.add_files(picked);
            renderer.print_info(&format_attachments(controller.composer()));
        }
        ChatCommand::Detach(index) => match controller.remove_file(index) {
            Some(removed) => renderer.print_info(&format!("Removed {}", removed.name)),
            None => renderer.print_error(&format!("No attached file number {}", index + 1)),
        },
        ChatCommand::Files => {
            renderer.print_info(&format_attachments(controller.composer()));
        }
        ChatCommand::Show => {
            let pending = controller.is_active_pending();
            renderer.print_transcript(controller.store(), pending);
        }
        ChatCommand::Help => {
            for line in help_text().lines() {
                println!("    {}", line);
            }
        }
        ChatCommand::Quit | ChatCommand::Send => {}
        ChatCommand::Invalid(message) => {
            renderer.print_error(&message);
        }
    }
}
