use crate::error::{RenderError, Result};
use papilon_graph::SpringSettings;
use serde::{Deserialize, Serialize};

pub const SKY_BLUE: [u8; 3] = [135, 206, 235];
pub const GRAY: [u8; 3] = [128, 128, 128];
pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

const POINTS_PER_INCH: f64 = 72.0;
const LABEL_POINTS: f64 = 12.0;
const TITLE_POINTS: f64 = 16.0;

/// Display options for a topology figure.
///
/// `node_size` is the marker area in points squared, so the on-canvas radius
/// grows with its square root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    pub title: String,
    pub node_size: f64,
    pub with_labels: bool,
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
    pub node_color: [u8; 3],
    pub edge_color: [u8; 3],
    pub background: [u8; 3],
    pub label_color: [u8; 3],
    pub layout: SpringSettings,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Topology Graph".to_string(),
            node_size: 500.0,
            with_labels: true,
            width: 1200,
            height: 800,
            dpi: 100.0,
            node_color: SKY_BLUE,
            edge_color: GRAY,
            background: WHITE,
            label_color: BLACK,
            layout: SpringSettings::default(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.node_size.is_finite() || self.node_size <= 0.0 {
            return Err(RenderError::InvalidOptions(format!(
                "node_size must be a positive number, got {}",
                self.node_size
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidOptions(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(RenderError::InvalidOptions(format!(
                "dpi must be a positive number, got {}",
                self.dpi
            )));
        }
        Ok(())
    }

    pub fn marker_radius(&self) -> f64 {
        self.node_size.sqrt() * 0.5 * self.points_to_pixels()
    }

    pub fn edge_width(&self) -> f64 {
        self.points_to_pixels().max(1.0)
    }

    pub fn label_scale(&self) -> u32 {
        self.glyph_scale(LABEL_POINTS)
    }

    pub fn title_scale(&self) -> u32 {
        self.glyph_scale(TITLE_POINTS)
    }

    fn points_to_pixels(&self) -> f64 {
        self.dpi / POINTS_PER_INCH
    }

    // glyph cells are 8 pixels tall at scale 1 (7 rows plus spacing)
    fn glyph_scale(&self, points: f64) -> u32 {
        ((points * self.points_to_pixels() / 8.0).round() as u32).max(1)
    }
}
