//! Tierlist Rendering Layer
//!
//! Turns a [`RenderSnapshot`](tierlist_domain::RenderSnapshot) into a PNG.
//!
//! # Pipeline
//!
//! 1. `fetch`: every member's avatar is fetched concurrently (bounded, with a
//!    per-fetch timeout); failures only lose that one avatar
//! 2. `layout`: band heights are computed for all tiers up front
//! 3. `compositor`: bands, avatars and names are drawn on a blocking worker
//!    and the canvas is encoded
//!
//! # Examples
//!
//! ```no_run
//! use tierlist_domain::{Member, MemberId, Tier, TierlistManager};
//! use tierlist_render::{RenderConfig, TierlistRenderer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut manager = TierlistManager::new();
//! manager.begin_tierlist("team")?;
//! manager.add_to_tierlist(MemberId(1), Member::new("Alice", "https://cdn.example/a.png"), Tier::S)?;
//!
//! let renderer = TierlistRenderer::new(&RenderConfig::default())?;
//! let image = renderer.render(&manager.snapshot_active()?).await?;
//! std::fs::write("tierlist.png", &image.png)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod compositor;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod renderer;
pub mod text;

pub use compositor::{Compositor, EncodedImage};
pub use config::{FetchConfig, LayoutConfig, PaletteConfig, RenderConfig, TextConfig};
pub use error::{ConfigError, RenderError};
pub use fetch::{AvatarFetcher, AvatarSource, FetchError, FetchReport, FetchedAvatars, HttpAvatarSource};
pub use layout::{Band, Layout, LayoutPlan};
pub use renderer::{RenderedImage, TierlistRenderer};
