//! Band geometry
//!
//! Pure arithmetic over the layout constants. Every band height is known
//! before anything is drawn, because the canvas height is their sum.

use crate::config::LayoutConfig;
use crate::error::RenderError;
use tierlist_domain::{RenderSnapshot, Tier};

/// Resolved layout constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    total_width: u32,
    avatar_size: u32,
    padding: u32,
    text_height: u32,
    min_tier_height: u32,
    label_width: u32,
}

/// One tier's horizontal strip of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Tier drawn in this band
    pub tier: Tier,
    /// Y offset of the band's top edge
    pub top: u32,
    /// Band height
    pub height: u32,
}

/// Bands for every tier, top to bottom, and the resulting canvas height
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// One band per tier in `Tier::ALL` order
    pub bands: Vec<Band>,
    /// Sum of all band heights
    pub total_height: u32,
}

impl Layout {
    /// Resolve constants from configuration
    pub fn new(config: &LayoutConfig) -> Result<Self, RenderError> {
        if config.total_width == 0 || config.avatar_size == 0 {
            return Err(RenderError::invalid_config("layout width and avatar size must be positive"));
        }
        if !(0.0..1.0).contains(&config.label_ratio) {
            return Err(RenderError::invalid_config("layout.label_ratio must be in [0, 1)"));
        }

        Ok(Self {
            total_width: config.total_width,
            avatar_size: config.avatar_size,
            padding: config.padding,
            text_height: config.text_height,
            min_tier_height: config.min_tier_height,
            label_width: (config.total_width as f64 * config.label_ratio).floor() as u32,
        })
    }

    /// Image width
    pub fn total_width(&self) -> u32 {
        self.total_width
    }

    /// Avatar side length
    pub fn avatar_size(&self) -> u32 {
        self.avatar_size
    }

    /// Padding between cells
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Name row height
    pub fn text_height(&self) -> u32 {
        self.text_height
    }

    /// Width of the label column
    pub fn label_width(&self) -> u32 {
        self.label_width
    }

    /// Width left for avatars
    pub fn content_width(&self) -> u32 {
        self.total_width - self.label_width
    }

    /// Horizontal step between avatar columns
    pub fn cell_width(&self) -> u32 {
        self.avatar_size + self.padding
    }

    /// Vertical step between avatar rows
    pub fn cell_height(&self) -> u32 {
        self.avatar_size + self.text_height + self.padding
    }

    /// Avatars that fit on one row, never less than 1
    pub fn avatars_per_row(&self) -> u32 {
        (self.content_width() / self.cell_width()).max(1)
    }

    /// Height of a band holding `member_count` members
    ///
    /// # Examples
    ///
    /// ```
    /// use tierlist_render::{Layout, LayoutConfig};
    ///
    /// let layout = Layout::new(&LayoutConfig::default()).unwrap();
    /// assert_eq!(layout.height_for(0), 120);
    /// assert_eq!(layout.height_for(7), 140);
    /// assert_eq!(layout.height_for(8), 270);
    /// ```
    pub fn height_for(&self, member_count: usize) -> u32 {
        if member_count == 0 {
            return self.min_tier_height.saturating_add(self.padding.saturating_mul(2));
        }

        let rows = (member_count as u64).div_ceil(self.avatars_per_row() as u64);
        let height = rows * self.cell_height() as u64 + self.padding as u64;
        u32::try_from(height).unwrap_or(u32::MAX)
    }

    /// Bands for every tier of the snapshot
    pub fn plan(&self, snapshot: &RenderSnapshot) -> LayoutPlan {
        let mut bands = Vec::with_capacity(Tier::COUNT);
        let mut top = 0u32;

        for (tier, members) in snapshot.iter() {
            let height = self.height_for(members.len());
            bands.push(Band { tier, top, height });
            top = top.saturating_add(height);
        }

        LayoutPlan {
            bands,
            total_height: top,
        }
    }

    /// Top-left pixel of the `index`th avatar in a band starting at `band_top`
    pub fn cell_origin(&self, band_top: u32, index: usize) -> (u32, u32) {
        let per_row = self.avatars_per_row() as usize;
        let col = (index % per_row) as u32;
        let row = (index / per_row) as u32;

        let x = self.label_width + self.padding + col * self.cell_width();
        let y = band_top + self.padding + row * self.cell_height();
        (x, y)
    }
}
