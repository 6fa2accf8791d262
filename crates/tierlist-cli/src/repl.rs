//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands::{parse_line, Outcome, Session};
use crate::config::{Config, Settings};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(session: &Session, settings: &Settings, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Tierlist REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e))))?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = prompt(session.active_name().as_deref());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                let command = match parse_line(line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                        continue;
                    }
                };

                match session.execute(command, formatter).await {
                    Ok(Outcome::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(Outcome::Reply { text, .. }) => println!("{}", text),
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// Prompt showing the active tierlist, if any.
fn prompt(active: Option<&str>) -> String {
    match active {
        Some(name) => format!("tierlist [{}]> ", name),
        None => "tierlist> ".to_string(),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt() {
        assert_eq!(prompt(None), "tierlist> ");
        assert_eq!(prompt(Some("team")), "tierlist [team]> ");
    }
}
