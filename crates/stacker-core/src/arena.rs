//! Arena configuration: the static world the shapes fall into.
//!
//! An [`ArenaConfig`] describes everything that exists before the first shape
//! drops: the ground slab, the starter boxes, the score bands, the spawn
//! point, and the camera view extents. Configs arrive from the client as
//! JSON and are validated before being loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thickness of the ground slab in pixels.
pub const GROUND_THICKNESS: f32 = 60.0;

/// Thickness of a score band strip in pixels.
pub const BAND_THICKNESS: f32 = 5.0;

/// Errors raised while parsing or validating an arena configuration.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("arena dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("two score bands share the height {y}")]
    DuplicateBandHeight { y: f32 },

    #[error("spawn point ({x}, {y}) lies outside the view extents")]
    SpawnOutOfBounds { x: f32, y: f32 },

    #[error("invalid arena JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arena metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaMeta {
    pub name: String,
}

impl Default for ArenaMeta {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
        }
    }
}

/// A horizontal sensor strip spanning the arena at height `y`.
///
/// Bands never collide; they only report overlap, and each overlap is worth
/// `points` while it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    /// Height of the band's centerline above the floor, in pixels.
    pub y: f32,
    /// Points awarded while a shape overlaps this band.
    pub points: i64,
}

/// A box resting in the arena at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarterBox {
    pub center: [f32; 2],
    pub size: f32,
}

/// Full description of the static world.
///
/// Coordinates are y-up pixels with the top of the ground slab at `y = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub meta: ArenaMeta,
    /// Visible arena width in pixels.
    pub width: f32,
    /// Visible arena height in pixels.
    pub height: f32,
    /// Dynamic boxes present at load time.
    #[serde(default)]
    pub starter_boxes: Vec<StarterBox>,
    /// Sensor strips, lowest first by convention (not required).
    pub bands: Vec<ScoreBand>,
    /// Where newly spawned shapes appear.
    pub spawn_point: [f32; 2],
    /// Camera view extents, min corner.
    pub view_min: [f32; 2],
    /// Camera view extents, max corner.
    pub view_max: [f32; 2],
}

impl ArenaConfig {
    /// The classic layout: a wide ground slab, two 80px starter boxes, and
    /// four bands whose heights are derived from the arena height, worth
    /// 10 / 1000 / 2000 / 5000 points.
    pub fn default_classic() -> Self {
        let width = 1200.0;
        let height = 800.0;

        Self {
            meta: ArenaMeta::default(),
            width,
            height,
            starter_boxes: vec![
                StarterBox {
                    center: [400.0, 100.0],
                    size: 80.0,
                },
                StarterBox {
                    center: [500.0, 100.0],
                    size: 80.0,
                },
            ],
            bands: vec![
                ScoreBand {
                    y: height - 500.0,
                    points: 10,
                },
                ScoreBand {
                    y: height - 100.0,
                    points: 1000,
                },
                ScoreBand {
                    y: height + 300.0,
                    points: 2000,
                },
                ScoreBand {
                    y: 2.0 * height - 100.0,
                    points: 5000,
                },
            ],
            spawn_point: [150.0, 100.0],
            view_min: [0.0, -100.0],
            view_max: [width, 2.0 * height],
        }
    }

    /// Parses and validates an arena configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the structural invariants of the configuration.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ArenaError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        for (i, band) in self.bands.iter().enumerate() {
            if self.bands[..i].iter().any(|other| other.y == band.y) {
                return Err(ArenaError::DuplicateBandHeight { y: band.y });
            }
        }

        let [x, y] = self.spawn_point;
        if x < self.view_min[0] || x > self.view_max[0] || y < self.view_min[1] || y > self.view_max[1]
        {
            return Err(ArenaError::SpawnOutOfBounds { x, y });
        }

        Ok(())
    }

    /// Center of the ground slab collider.
    pub fn ground_center(&self) -> [f32; 2] {
        [self.width * 0.5, -GROUND_THICKNESS * 0.5]
    }

    /// Half extents of the ground slab collider.
    ///
    /// The slab spans twice the arena width so dragged shapes cannot be
    /// pulled off its edge.
    pub fn ground_half_extents(&self) -> [f32; 2] {
        [self.width, GROUND_THICKNESS * 0.5]
    }

    /// Half extents of a band collider.
    pub fn band_half_extents(&self) -> [f32; 2] {
        [self.width, BAND_THICKNESS * 0.5]
    }

    /// Horizontal center of the arena (bands are centered here).
    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::default_classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classic_is_valid() {
        let config = ArenaConfig::default_classic();
        assert!(config.validate().is_ok());
        assert_eq!(config.bands.len(), 4);
        assert_eq!(config.bands[3].points, 5000);
    }

    #[test]
    fn test_band_heights_derive_from_arena_height() {
        let config = ArenaConfig::default_classic();
        assert_eq!(config.bands[0].y, config.height - 500.0);
        assert_eq!(config.bands[3].y, 2.0 * config.height - 100.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ArenaConfig::default_classic();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = ArenaConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let mut config = ArenaConfig::default_classic();
        config.width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_band_heights() {
        let mut config = ArenaConfig::default_classic();
        let y = config.bands[0].y;
        config.bands.push(ScoreBand { y, points: 42 });
        assert!(matches!(
            config.validate(),
            Err(ArenaError::DuplicateBandHeight { .. })
        ));
    }

    #[test]
    fn test_rejects_spawn_outside_extents() {
        let mut config = ArenaConfig::default_classic();
        config.spawn_point = [-5000.0, 100.0];
        assert!(matches!(
            config.validate(),
            Err(ArenaError::SpawnOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ArenaConfig::from_json("{not json"),
            Err(ArenaError::Parse(_))
        ));
    }
}
