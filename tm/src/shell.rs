//! Interactive shell
//!
//! Plain text adds a task, like typing into the "What needs to be done?" box.
//! Slash commands cover everything else and the list is redrawn after each
//! change.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app::{App, Request};

/// One parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Request(Request),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse one line of input
pub fn parse_line(line: &str) -> ShellInput {
    let input = line.trim();
    if input.is_empty() {
        return ShellInput::Empty;
    }
    let Some(command) = input.strip_prefix('/') else {
        return ShellInput::Request(Request::Add(input.to_string()));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "help" | "h" | "?" => ShellInput::Help,
        "quit" | "q" | "exit" => ShellInput::Quit,
        "add" | "a" => ShellInput::Request(Request::Add(rest.to_string())),
        "toggle" | "t" | "x" if !rest.is_empty() => ShellInput::Request(Request::Toggle(rest.to_string())),
        "rm" | "delete" | "d" if !rest.is_empty() => ShellInput::Request(Request::Delete(rest.to_string())),
        "edit" | "e" if !rest.is_empty() => {
            let (reference, title) = match rest.split_once(char::is_whitespace) {
                Some((reference, title)) => (reference, title.trim()),
                None => (rest, ""),
            };
            ShellInput::Request(Request::Edit {
                reference: reference.to_string(),
                title: title.to_string(),
            })
        }
        "all" => ShellInput::Request(Request::ToggleAll(true)),
        "none" => ShellInput::Request(Request::ToggleAll(false)),
        "clear" => ShellInput::Request(Request::ClearCompleted),
        "filter" | "f" => ShellInput::Request(Request::Filter(rest.to_string())),
        "list" | "ls" | "l" => ShellInput::Request(Request::List((!rest.is_empty()).then(|| rest.to_string()))),
        _ => ShellInput::Unknown(input.to_string()),
    }
}

fn print_help() {
    println!();
    println!("{}", "Commands:".bold());
    println!("  {:<22} add a task", "<text>");
    println!("  {:<22} flip a task", "/toggle <id>");
    println!("  {:<22} delete a task", "/rm <id>");
    println!("  {:<22} retitle a task (blank deletes)", "/edit <id> <title>");
    println!("  {:<22} mark everything completed", "/all");
    println!("  {:<22} mark everything active", "/none");
    println!("  {:<22} remove completed tasks", "/clear");
    println!("  {:<22} all, active or completed", "/filter <name>");
    println!("  {:<22} show the list", "/list [name]");
    println!("  {:<22} leave", "/quit");
    println!();
}

/// Run the shell until the user quits
pub fn run(app: &mut App) -> Result<()> {
    println!("{}", "todomvc shell".bright_cyan().bold());
    println!("Type a task to add it, {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
    println!();
    println!("{}", app.render(None));

    let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

    loop {
        let readline = rl.readline(&format!("{} ", "❯".bright_green()));

        match readline {
            Ok(line) => {
                let parsed = parse_line(&line);
                if parsed != ShellInput::Empty {
                    let _ = rl.add_history_entry(line.trim());
                }

                match parsed {
                    ShellInput::Empty => continue,
                    ShellInput::Quit => break,
                    ShellInput::Help => print_help(),
                    ShellInput::Unknown(input) => {
                        println!("{} {} (try /help)", "Unknown command:".red(), input);
                    }
                    ShellInput::Request(request) => {
                        let is_list = matches!(request, Request::List(_));
                        let outcome = app.handle(request);
                        for note in &outcome.notes {
                            println!("{}", note.yellow());
                        }
                        if outcome.changed || is_list {
                            println!("{}", app.render(outcome.view));
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - just show new prompt
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!();
                break;
            }
            Err(err) => {
                return Err(eyre::eyre!("Readline error: {}", err));
            }
        }
    }

    Ok(())
}
