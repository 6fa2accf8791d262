//! Script replay: run a file of session commands against one session.

use super::{parse_line, Outcome, Session};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::Write;
use std::path::Path;

/// Counts for a replayed script.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Commands that were executed
    pub executed: usize,
    /// Lines that were rejected or whose command did not succeed
    pub failed: usize,
}

/// Replay the script at `path`, printing replies to stdout.
pub async fn run_script(path: &Path, session: &Session, formatter: &Formatter, strict: bool) -> Result<ScriptSummary> {
    let script = tokio::fs::read_to_string(path).await?;
    tracing::info!("Replaying {}", path.display());
    replay(&script, session, formatter, strict, &mut std::io::stdout()).await
}

/// Replay `script` line by line, writing replies to `out`.
///
/// Blank lines and `#` comments are skipped and `exit` stops the replay.
/// Without `strict`, unparseable lines and failed commands are reported and
/// the replay continues.
pub async fn replay<W: Write>(
    script: &str,
    session: &Session,
    formatter: &Formatter,
    strict: bool,
    out: &mut W,
) -> Result<ScriptSummary> {
    let mut summary = ScriptSummary::default();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;

        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                summary.failed += 1;
                if strict {
                    return Err(CliError::InvalidInput(format!("line {}: {}", line_no, e)));
                }
                writeln!(out, "{}", formatter.error(&format!("line {}: {}", line_no, e)))?;
                continue;
            }
        };

        match session.execute(command, formatter).await {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Reply { text, success }) => {
                summary.executed += 1;
                if !success {
                    summary.failed += 1;
                }
                writeln!(out, "{}", text)?;
            }
            Err(e) => {
                summary.executed += 1;
                summary.failed += 1;
                if strict {
                    return Err(e);
                }
                writeln!(out, "{}", formatter.error(&format!("line {}: {}", line_no, e)))?;
            }
        }
    }

    Ok(summary)
}
