//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tierlist_domain::{Tier, Tierlist, SUCCESS};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a state command as `Result: <STATUS>`.
    pub fn status(&self, status: &str) -> String {
        let line = format!("Result: {}", status);
        if status == SUCCESS {
            self.colorize(&line, "green")
        } else {
            self.colorize(&line, "red")
        }
    }

    /// Format a tierlist's members.
    pub fn format_tierlist(&self, name: &str, tierlist: &Tierlist) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_tierlist_json(name, tierlist),
            OutputFormat::Table => self.format_tierlist_table(name, tierlist),
            OutputFormat::Quiet => self.format_tierlist_quiet(tierlist),
        }
    }

    /// Format a tierlist as JSON; every tier is present, empty or not.
    fn format_tierlist_json(&self, name: &str, tierlist: &Tierlist) -> Result<String> {
        let tiers: Vec<serde_json::Value> = tierlist
            .iter()
            .map(|(tier, members)| {
                let members: Vec<serde_json::Value> = members
                    .iter()
                    .map(|(id, member)| {
                        serde_json::json!({
                            "id": id.value(),
                            "name": member.name,
                            "avatar_url": member.avatar_url,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "tier": tier.label(),
                    "members": members,
                })
            })
            .collect();

        let json = serde_json::json!({
            "name": name,
            "tiers": tiers,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format a tierlist as a table.
    fn format_tierlist_table(&self, name: &str, tierlist: &Tierlist) -> Result<String> {
        if tierlist.is_empty() {
            return Ok(self.colorize(&format!("Tierlist '{}' is empty.", name), "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Tier", "ID", "Name", "Avatar"]);

        for (tier, members) in tierlist.iter() {
            for (id, member) in members {
                builder.push_record([
                    tier.label().to_string(),
                    id.to_string(),
                    member.name.clone(),
                    member.avatar_url.clone(),
                ]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(format!("{}\n{}", self.colorize(name, "cyan"), table))
    }

    /// Format a tierlist in quiet mode (IDs only, best tier first).
    fn format_tierlist_quiet(&self, tierlist: &Tierlist) -> Result<String> {
        let ids: Vec<String> = tierlist
            .iter()
            .flat_map(|(_, members)| members.iter().map(|(id, _)| id.to_string()))
            .collect();
        Ok(ids.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// One-line description of each tier's member count, e.g. `S:2 A:0 ...`.
pub fn tier_counts(tierlist: &Tierlist) -> String {
    Tier::ALL
        .iter()
        .map(|tier| format!("{}:{}", tier.label(), tierlist.members(*tier).len()))
        .collect::<Vec<_>>()
        .join(" ")
}
