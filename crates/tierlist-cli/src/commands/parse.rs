//! Session command grammar, shared by the REPL and scripts.

use crate::error::{CliError, Result};
use std::path::PathBuf;
use tierlist_domain::MemberId;

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `begin <name>`
    Begin {
        /// Tierlist name, may contain spaces
        name: String,
    },
    /// `end`
    End,
    /// `add <id> <tier> <avatar-uri> <display name...>`
    Add {
        /// Member id
        id: MemberId,
        /// Tier as typed; validated by the tierlist
        tier: String,
        /// Avatar URI
        avatar_uri: String,
        /// Display name, may contain spaces
        name: String,
    },
    /// `remove <id>`
    Remove {
        /// Member id
        id: MemberId,
    },
    /// `show [path]`
    Show {
        /// Output file; the configured default when absent
        path: Option<PathBuf>,
    },
    /// `list`
    List,
    /// `help`
    Help,
    /// `exit`
    Exit,
}

/// Parse one line; `None` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let args = &parts[1..];

    let command = match parts[0].to_ascii_lowercase().as_str() {
        "begin" => parse_begin(args)?,
        "end" => SessionCommand::End,
        "add" => parse_add(args)?,
        "remove" | "rm" => parse_remove(args)?,
        "show" | "render" => SessionCommand::Show {
            path: args.first().map(PathBuf::from),
        },
        "list" | "ls" => SessionCommand::List,
        "help" | "?" => SessionCommand::Help,
        "exit" | "quit" | "q" => SessionCommand::Exit,
        other => {
            return Err(CliError::InvalidInput(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_begin(args: &[&str]) -> Result<SessionCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: begin <name>".to_string()));
    }

    Ok(SessionCommand::Begin { name: args.join(" ") })
}

fn parse_add(args: &[&str]) -> Result<SessionCommand> {
    if args.len() < 4 {
        return Err(CliError::InvalidInput(
            "Usage: add <id> <tier> <avatar-uri> <display name...>".to_string(),
        ));
    }

    Ok(SessionCommand::Add {
        id: parse_id(args[0])?,
        tier: args[1].to_string(),
        avatar_uri: args[2].to_string(),
        name: args[3..].join(" "),
    })
}

fn parse_remove(args: &[&str]) -> Result<SessionCommand> {
    match args {
        [id] => Ok(SessionCommand::Remove { id: parse_id(id)? }),
        _ => Err(CliError::InvalidInput("Usage: remove <id>".to_string())),
    }
}

fn parse_id(s: &str) -> Result<MemberId> {
    s.parse().map_err(CliError::InvalidInput)
}

/// Command reference printed by `help`.
pub fn help_text() -> &'static str {
    concat!(
        "  begin <name>                        - Start a tierlist (or resume a stored one)\n",
        "  end                                 - Stop editing the active tierlist\n",
        "  add <id> <tier> <uri> <name...>     - Put a member in a tier (S, A, B, C, D, F)\n",
        "  remove <id>                         - Take a member out of the active tierlist\n",
        "  show [path]                         - Render the active tierlist to a PNG\n",
        "  list                                - Print the active tierlist\n",
        "  help, ?                             - Show this help\n",
        "  exit, quit, q                       - Leave",
    )
}
