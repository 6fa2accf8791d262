//! Command implementations.
//!
//! A [`Session`] owns one manager and one renderer; every REPL line or script
//! line becomes a [`SessionCommand`] executed against it.

pub mod list;
pub mod parse;
pub mod script;
pub mod show;
pub mod state;

pub use self::list::execute_list;
pub use self::parse::{help_text, parse_line, SessionCommand};
pub use self::script::{replay, run_script, ScriptSummary};
pub use self::show::execute_show;
pub use self::state::{execute_add, execute_begin, execute_end, execute_remove};

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::{Path, PathBuf};
use tierlist_domain::{status_name, SharedManager, TierlistResult};
use tierlist_render::TierlistRenderer;

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print
    Reply {
        /// Formatted output, possibly several lines
        text: String,
        /// Whether the command did what was asked
        success: bool,
    },
    /// Leave the REPL or stop the script
    Exit,
}

/// State shared by all commands of one REPL or script run.
pub struct Session {
    manager: SharedManager,
    renderer: TierlistRenderer,
    default_output: PathBuf,
}

impl Session {
    /// Create a session with an empty manager.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            manager: SharedManager::default(),
            renderer: TierlistRenderer::new(&config.render)?,
            default_output: config.settings.output.clone(),
        })
    }

    /// The tierlists of this session.
    pub fn manager(&self) -> &SharedManager {
        &self.manager
    }

    /// The renderer used by `show`.
    pub fn renderer(&self) -> &TierlistRenderer {
        &self.renderer
    }

    /// Where `show` writes without an explicit path.
    pub fn default_output(&self) -> &Path {
        &self.default_output
    }

    /// Name of the active tierlist, if any.
    pub fn active_name(&self) -> Option<String> {
        self.manager.with(|m| m.active_name().map(str::to_string))
    }

    /// Execute one command.
    ///
    /// State-machine failures come back as a `Result: <STATUS>` reply; `Err`
    /// is reserved for I/O and render failures.
    pub async fn execute(&self, command: SessionCommand, formatter: &Formatter) -> Result<Outcome> {
        tracing::debug!("Executing {:?}", command);

        match command {
            SessionCommand::Begin { name } => Ok(execute_begin(&self.manager, &name, formatter)),
            SessionCommand::End => Ok(execute_end(&self.manager, formatter)),
            SessionCommand::Add {
                id,
                tier,
                avatar_uri,
                name,
            } => Ok(execute_add(&self.manager, id, &tier, avatar_uri, name, formatter)),
            SessionCommand::Remove { id } => Ok(execute_remove(&self.manager, id, formatter)),
            SessionCommand::Show { path } => execute_show(self, path, formatter).await,
            SessionCommand::List => execute_list(&self.manager, formatter),
            SessionCommand::Help => Ok(Outcome::Reply {
                text: format!("{}\n{}", formatter.info("Available commands:"), help_text()),
                success: true,
            }),
            SessionCommand::Exit => Ok(Outcome::Exit),
        }
    }
}

/// Reply carrying the `Result: <STATUS>` line of a state operation.
pub(crate) fn status_outcome<T>(result: &TierlistResult<T>, formatter: &Formatter) -> Outcome {
    Outcome::Reply {
        text: formatter.status(status_name(result)),
        success: result.is_ok(),
    }
}
