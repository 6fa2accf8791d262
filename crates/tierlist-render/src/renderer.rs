//! Render pipeline: fetch avatars, wait for all of them, then draw on a
//! blocking worker so the async runtime keeps serving other requests.

use crate::compositor::Compositor;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::fetch::{AvatarFetcher, AvatarSource, FetchReport, HttpAvatarSource};
use crate::layout::Layout;
use std::sync::Arc;
use tierlist_domain::RenderSnapshot;

/// A finished tierlist image
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// PNG bytes, starting at offset 0
    pub png: Vec<u8>,
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
    /// How the avatar fetches went
    pub fetch_report: FetchReport,
}

/// Renders tierlist snapshots to PNG
///
/// Holds the avatar source (one HTTP session) and the loaded fonts, so one
/// renderer should be reused across renders.
pub struct TierlistRenderer<S = HttpAvatarSource> {
    fetcher: AvatarFetcher<S>,
    compositor: Arc<Compositor>,
}

impl TierlistRenderer<HttpAvatarSource> {
    /// Renderer fetching avatars over HTTP
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        let source = HttpAvatarSource::new(&config.fetch)?;
        Self::with_source(config, source)
    }
}

impl<S: AvatarSource> TierlistRenderer<S> {
    /// Renderer over a custom avatar source
    pub fn with_source(config: &RenderConfig, source: S) -> Result<Self, RenderError> {
        Ok(Self {
            fetcher: AvatarFetcher::new(source, &config.fetch),
            compositor: Arc::new(Compositor::new(config)?),
        })
    }

    /// Geometry in use
    pub fn layout(&self) -> &Layout {
        self.compositor.layout()
    }

    /// Render a snapshot
    ///
    /// # Errors
    ///
    /// Only when the image as a whole cannot be produced (canvas too large,
    /// encoding failure, worker panic). Unreachable or broken avatars are
    /// skipped.
    pub async fn render(&self, snapshot: &RenderSnapshot) -> Result<RenderedImage, RenderError> {
        tracing::debug!("Rendering tierlist '{}'", snapshot.name());

        let fetched = self.fetcher.fetch_all(snapshot.avatar_requests()).await;
        let fetch_report = fetched.report;
        if fetch_report.failed > 0 {
            tracing::info!(
                "Rendering '{}' without {} of {} avatars",
                snapshot.name(),
                fetch_report.failed,
                fetch_report.requested
            );
        }

        let compositor = Arc::clone(&self.compositor);
        let snapshot = snapshot.clone();
        let encoded = tokio::task::spawn_blocking(move || compositor.render_png(&snapshot, &fetched.avatars))
            .await
            .map_err(|e| RenderError::Worker(format!("Task join error: {}", e)))??;

        tracing::info!("Rendered tierlist image {}x{}", encoded.width, encoded.height);
        Ok(RenderedImage {
            png: encoded.png,
            width: encoded.width,
            height: encoded.height,
            fetch_report,
        })
    }
}
