//! Render configuration
//!
//! Geometry, fetch limits, fonts and colors. Every field has a default, so an
//! empty TOML document (or no file at all) gives the standard 1000px-wide
//! layout.
//!
//! ```toml
//! max_canvas_height = 30000
//!
//! [layout]
//! total_width = 1000
//! avatar_size = 100
//!
//! [fetch]
//! max_concurrent_fetches = 16
//! fetch_timeout_ms = 10000
//!
//! [text]
//! font_family = "DejaVu Sans"
//! font_files = ["/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"]
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tierlist_domain::Rgb;

/// Top-level render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Band geometry
    pub layout: LayoutConfig,

    /// Avatar fetching limits
    pub fetch: FetchConfig,

    /// Font selection and sizes
    pub text: TextConfig,

    /// Fixed colors
    pub palette: PaletteConfig,

    /// Tallest image that will be allocated, in pixels
    /// Default: 30000 (roughly 1600 members in one tier)
    pub max_canvas_height: u32,
}

/// Band geometry, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the whole image
    pub total_width: u32,

    /// Side of the square each avatar is scaled to
    pub avatar_size: u32,

    /// Gap around and between avatars
    pub padding: u32,

    /// Height of the name row under each avatar
    pub text_height: u32,

    /// Content height of a tier with no members
    pub min_tier_height: u32,

    /// Fraction of `total_width` taken by the label column
    pub label_ratio: f64,
}

/// Avatar fetching limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Fetches in flight at once for one render
    pub max_concurrent_fetches: usize,

    /// Per-avatar deadline in milliseconds
    pub fetch_timeout_ms: u64,

    /// Larger avatar bodies are discarded
    pub max_avatar_bytes: usize,

    /// User-Agent header sent with HTTP requests
    pub user_agent: String,
}

/// Font selection
///
/// Text goes through an explicit fallback chain: `font_family`, then the
/// generic sans-serif, serif and monospace families, then whatever face was
/// loaded first. When neither the system nor `font_files` yield a face, the
/// bundled Tuffy face (public domain, `assets/Tuffy.ttf`) is loaded, so
/// labels and names are always drawn unless `bundled_fallback` is off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Preferred font family
    /// Default: "sans-serif"
    pub font_family: String,

    /// Extra font files (ttf/otf/ttc) to load
    pub font_files: Vec<PathBuf>,

    /// Whether to scan the system font directories
    pub load_system_fonts: bool,

    /// Load the bundled face when no other face is available
    /// Default: true
    pub bundled_fallback: bool,

    /// Size of the tier letter in the label column
    pub label_font_size: f32,

    /// Size of member names
    pub name_font_size: f32,
}

/// Fixed colors (tier colors come from the tier table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Canvas background
    pub background: Rgb,

    /// Label outline and separator lines
    pub outline: Rgb,

    /// Tier letter
    pub label_text: Rgb,

    /// Member names
    pub name_text: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            fetch: FetchConfig::default(),
            text: TextConfig::default(),
            palette: PaletteConfig::default(),
            max_canvas_height: 30_000,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            total_width: 1000,
            avatar_size: 100,
            padding: 10,
            text_height: 20,
            min_tier_height: 100,
            label_ratio: 0.15,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 16,
            fetch_timeout_ms: 10_000,
            max_avatar_bytes: 8 * 1024 * 1024,
            user_agent: concat!("tierlist/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_files: Vec::new(),
            load_system_fonts: true,
            bundled_fallback: true,
            label_font_size: 40.0,
            name_font_size: 15.0,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: [30, 30, 30],
            outline: [0, 0, 0],
            label_text: [0, 0, 0],
            name_text: [200, 200, 200],
        }
    }
}

impl FetchConfig {
    /// Per-avatar deadline as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl RenderConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.total_width == 0 {
            return Err(ConfigError::Invalid("layout.total_width must be positive".into()));
        }
        if layout.avatar_size == 0 {
            return Err(ConfigError::Invalid("layout.avatar_size must be positive".into()));
        }
        if !(0.0..1.0).contains(&layout.label_ratio) {
            return Err(ConfigError::Invalid(format!(
                "layout.label_ratio must be in [0, 1), got {}",
                layout.label_ratio
            )));
        }
        if self.fetch.max_concurrent_fetches == 0 {
            return Err(ConfigError::Invalid("fetch.max_concurrent_fetches must be at least 1".into()));
        }
        if self.max_canvas_height == 0 {
            return Err(ConfigError::Invalid("max_canvas_height must be positive".into()));
        }
        Ok(())
    }
}
