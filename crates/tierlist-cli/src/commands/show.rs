//! Show command implementation.

use super::{status_outcome, Outcome, Session};
use crate::error::Result;
use crate::output::{tier_counts, Formatter};
use std::path::PathBuf;
use tierlist_domain::SUCCESS;

/// Execute the show command: render the active tierlist to a PNG file.
///
/// The snapshot is taken under the manager lock and the lock is released
/// before any avatar is fetched.
pub async fn execute_show(session: &Session, path: Option<PathBuf>, formatter: &Formatter) -> Result<Outcome> {
    let snapshot = match session.manager().with(|m| m.snapshot_active()) {
        Ok(snapshot) => snapshot,
        Err(e) => return Ok(status_outcome(&Err::<(), _>(e), formatter)),
    };
    let path = path.unwrap_or_else(|| session.default_output().to_path_buf());

    let image = session.renderer().render(&snapshot).await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &image.png).await?;
    tracing::info!("Wrote {} bytes to {}", image.png.len(), path.display());

    let mut lines = vec![formatter.success(&format!(
        "Saved '{}' ({}) as {}x{} image to {}",
        snapshot.name(),
        tier_counts(snapshot.tierlist()),
        image.width,
        image.height,
        path.display()
    ))];

    let report = image.fetch_report;
    if report.failed > 0 {
        lines.push(formatter.warning(&format!(
            "{} of {} avatars could not be loaded",
            report.failed, report.requested
        )));
    }
    lines.push(formatter.status(SUCCESS));

    Ok(Outcome::Reply {
        text: lines.join("\n"),
        success: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{formatter, session, text};
    use crate::commands::{execute_add, execute_begin};
    use tierlist_domain::MemberId;

    #[tokio::test]
    async fn test_show_without_active_list() {
        let session = session();
        let outcome = execute_show(&session, None, &formatter()).await.unwrap();
        assert_eq!(text(outcome), "Result: TIERLIST_NOT_ACTIVE");
    }

    #[tokio::test]
    async fn test_show_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("board.png");
        let session = session();
        let f = formatter();

        execute_begin(session.manager(), "team", &f);
        execute_add(session.manager(), MemberId(1), "S", "not-a-uri".into(), "Alice".into(), &f);

        let output = text(execute_show(&session, Some(path.clone()), &f).await.unwrap());
        assert!(output.contains("1000x740"));
        assert!(output.contains("1 of 1 avatars could not be loaded"));
        assert!(output.ends_with("Result: SUCCESS"));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
