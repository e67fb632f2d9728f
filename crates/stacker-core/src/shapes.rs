//! Falling-shape catalogue with deterministic random generation.

use rand::prelude::*;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

/// Mass density shared by every falling shape.
pub const SHAPE_DENSITY: f32 = 1.0;

/// Friction coefficient shared by every falling shape. High on purpose:
/// stacks should hold rather than slide apart.
pub const SHAPE_FRICTION: f32 = 10.0;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Predefined colors for shapes.
    pub const RED: Color = Color::rgb(230, 70, 70);
    pub const BLUE: Color = Color::rgb(70, 110, 230);
    pub const GREEN: Color = Color::rgb(70, 200, 120);
    pub const YELLOW: Color = Color::rgb(235, 200, 60);
    pub const PURPLE: Color = Color::rgb(160, 80, 200);
    pub const ORANGE: Color = Color::rgb(240, 140, 50);

    /// Returns the list of default shape colors.
    pub fn palette() -> Vec<Color> {
        vec![
            Self::RED,
            Self::BLUE,
            Self::GREEN,
            Self::YELLOW,
            Self::PURPLE,
            Self::ORANGE,
        ]
    }
}

/// The three families of falling shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Narrow upright box, the most common roll.
    TallBox,
    /// Squat wide box.
    WideBox,
    /// Regular four-sided polygon standing on a corner.
    Diamond,
}

/// Geometry of one falling shape.
///
/// For boxes `half_extents` is the usual half width/height; for diamonds
/// both components hold the circumradius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub half_extents: [f32; 2],
}

impl ShapeSpec {
    /// Draws a random shape with the classic distribution: an even split
    /// between boxes and diamonds, and boxes split 80/20 tall/wide.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            if rng.random_range(0.0..1.0) < 0.8 {
                Self {
                    kind: ShapeKind::TallBox,
                    half_extents: [
                        rng.random_range(25.0..50.0) / 2.0,
                        rng.random_range(50.0..100.0) / 2.0,
                    ],
                }
            } else {
                Self {
                    kind: ShapeKind::WideBox,
                    half_extents: [
                        rng.random_range(80.0..120.0) / 2.0,
                        rng.random_range(50.0..70.0) / 2.0,
                    ],
                }
            }
        } else {
            let radius = rng.random_range(50.0..100.0);
            Self {
                kind: ShapeKind::Diamond,
                half_extents: [radius, radius],
            }
        }
    }

    /// Builds the rapier collider for this shape, with the shared body
    /// parameters and collision events enabled.
    pub fn collider(&self) -> ColliderBuilder {
        let builder = match self.kind {
            ShapeKind::TallBox | ShapeKind::WideBox => {
                ColliderBuilder::cuboid(self.half_extents[0], self.half_extents[1])
            }
            ShapeKind::Diamond => {
                let r = self.half_extents[0];
                let points = [
                    Vector::new(r, 0.0),
                    Vector::new(0.0, r),
                    Vector::new(-r, 0.0),
                    Vector::new(0.0, -r),
                ];
                ColliderBuilder::convex_hull(&points).unwrap_or_else(|| {
                    // Degenerate hulls cannot happen for these vertices;
                    // an axis-aligned box of the same area is the fallback.
                    ColliderBuilder::cuboid(r * std::f32::consts::FRAC_1_SQRT_2, r * std::f32::consts::FRAC_1_SQRT_2)
                })
            }
        };

        builder
            .density(SHAPE_DENSITY)
            .friction(SHAPE_FRICTION)
            .active_events(ActiveEvents::COLLISION_EVENTS)
    }

    /// Builds the dynamic rigid body for this shape at `position`.
    pub fn body(&self, position: [f32; 2]) -> RigidBodyBuilder {
        RigidBodyBuilder::dynamic()
            .translation(Vector::new(position[0], position[1]))
            .ccd_enabled(true)
    }

    /// Radius of the smallest circle containing the shape, used by the drag
    /// hit test as a cheap pre-filter.
    pub fn bounding_radius(&self) -> f32 {
        match self.kind {
            ShapeKind::TallBox | ShapeKind::WideBox => {
                (self.half_extents[0].powi(2) + self.half_extents[1].powi(2)).sqrt()
            }
            ShapeKind::Diamond => self.half_extents[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..32 {
            assert_eq!(ShapeSpec::random(&mut rng1), ShapeSpec::random(&mut rng2));
        }
    }

    #[test]
    fn test_dimensions_stay_in_catalogue_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..500 {
            let spec = ShapeSpec::random(&mut rng);
            let [hx, hy] = spec.half_extents;
            match spec.kind {
                ShapeKind::TallBox => {
                    assert!((12.5..25.0).contains(&hx));
                    assert!((25.0..50.0).contains(&hy));
                }
                ShapeKind::WideBox => {
                    assert!((40.0..60.0).contains(&hx));
                    assert!((25.0..35.0).contains(&hy));
                }
                ShapeKind::Diamond => {
                    assert!((50.0..100.0).contains(&hx));
                    assert_eq!(hx, hy);
                }
            }
        }
    }

    #[test]
    fn test_tall_boxes_dominate_box_rolls() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut tall = 0;
        let mut wide = 0;

        for _ in 0..2000 {
            match ShapeSpec::random(&mut rng).kind {
                ShapeKind::TallBox => tall += 1,
                ShapeKind::WideBox => wide += 1,
                ShapeKind::Diamond => {}
            }
        }

        assert!(tall > wide * 2, "tall={tall} wide={wide}");
    }

    #[test]
    fn test_diamond_collider_builds() {
        let spec = ShapeSpec {
            kind: ShapeKind::Diamond,
            half_extents: [60.0, 60.0],
        };
        let collider = spec.collider().build();
        assert!(collider.shape().as_convex_polygon().is_some());
    }

    #[test]
    fn test_bounding_radius_covers_box_corners() {
        let spec = ShapeSpec {
            kind: ShapeKind::TallBox,
            half_extents: [15.0, 40.0],
        };
        let corner = (15.0_f32.powi(2) + 40.0_f32.powi(2)).sqrt();
        assert!((spec.bounding_radius() - corner).abs() < f32::EPSILON);
    }
}
