//! Procedural starfield background
//!
//! The world is cut into square tiles; each tile's stars come from an RNG
//! seeded by the tile coordinate, so the field is infinite, needs no storage,
//! and always looks the same in the same place. Three layers scroll at
//! different rates for parallax. Purely cosmetic.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::Camera;

/// Tile edge length in world units
pub const TILE_SIZE: f32 = 256.0;

/// One parallax layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarLayer {
    /// Scroll rate relative to the camera (1.0 = moves with the world)
    pub parallax: f32,
    pub stars_per_tile: u32,
    pub max_radius: f32,
    pub max_brightness: f32,
}

const LAYERS: [StarLayer; 3] = [
    StarLayer {
        parallax: 0.2,
        stars_per_tile: 14,
        max_radius: 0.9,
        max_brightness: 0.5,
    },
    StarLayer {
        parallax: 0.5,
        stars_per_tile: 7,
        max_radius: 1.4,
        max_brightness: 0.75,
    },
    StarLayer {
        parallax: 0.8,
        stars_per_tile: 3,
        max_radius: 2.0,
        max_brightness: 1.0,
    },
];

/// A star placed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub screen_pos: Vec2,
    pub radius: f32,
    pub brightness: f32,
}

/// Deterministic infinite starfield
#[derive(Debug, Clone)]
pub struct StarField {
    seed: u64,
    layers: [StarLayer; 3],
}

impl StarField {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            layers: LAYERS,
        }
    }

    /// Stars of one tile, positioned relative to the tile's top-left corner
    pub fn tile_stars(&self, layer: usize, tx: i32, ty: i32) -> Vec<Star> {
        let style = self.layers[layer];
        let mut rng = Pcg32::seed_from_u64(tile_seed(self.seed, layer as u64, tx, ty));

        (0..style.stars_per_tile)
            .map(|_| Star {
                screen_pos: Vec2::new(
                    rng.random_range(0.0..TILE_SIZE),
                    rng.random_range(0.0..TILE_SIZE),
                ),
                radius: rng.random_range(0.3..=style.max_radius),
                brightness: rng.random_range(0.2..=style.max_brightness),
            })
            .collect()
    }

    /// Every star that lands inside the camera's viewport, in screen space
    pub fn visible_stars(&self, camera: &Camera) -> Vec<Star> {
        let mut out = Vec::new();

        for (layer, style) in self.layers.iter().enumerate() {
            let origin = camera.offset * style.parallax;
            let min_tile = (origin / TILE_SIZE).floor();
            let max_tile = ((origin + camera.viewport) / TILE_SIZE).floor();

            for ty in min_tile.y as i32..=max_tile.y as i32 {
                for tx in min_tile.x as i32..=max_tile.x as i32 {
                    let corner = Vec2::new(tx as f32, ty as f32) * TILE_SIZE;
                    for star in self.tile_stars(layer, tx, ty) {
                        let screen_pos = corner + star.screen_pos - origin;
                        let inside = screen_pos.cmpge(Vec2::ZERO).all()
                            && screen_pos.cmplt(camera.viewport).all();
                        if inside {
                            out.push(Star { screen_pos, ..star });
                        }
                    }
                }
            }
        }

        out
    }
}

/// Mix field seed, layer and tile coordinate into one RNG seed (splitmix64)
fn tile_seed(seed: u64, layer: u64, tx: i32, ty: i32) -> u64 {
    let mut z = seed
        ^ layer.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (tx as u32 as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9)
        ^ ((ty as u32 as u64) << 32);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(x: f32, y: f32) -> Camera {
        Camera {
            offset: Vec2::new(x, y),
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    #[test]
    fn test_tiles_are_deterministic() {
        let field = StarField::new(7);
        assert_eq!(field.tile_stars(1, -3, 12), field.tile_stars(1, -3, 12));
        assert_eq!(
            StarField::new(7).tile_stars(0, 5, 5),
            StarField::new(7).tile_stars(0, 5, 5)
        );
        assert_ne!(field.tile_stars(1, -3, 12), field.tile_stars(1, -3, 13));
        assert_ne!(field.tile_stars(0, 0, 0), StarField::new(8).tile_stars(0, 0, 0));
    }

    #[test]
    fn test_visible_stars_stay_on_screen() {
        let field = StarField::new(3);
        let cam = camera_at(-12345.0, 6789.0);
        let stars = field.visible_stars(&cam);
        assert!(!stars.is_empty());
        for s in &stars {
            assert!(s.screen_pos.x >= 0.0 && s.screen_pos.x < 800.0);
            assert!(s.screen_pos.y >= 0.0 && s.screen_pos.y < 600.0);
        }
    }

    #[test]
    fn test_same_view_same_stars() {
        let field = StarField::new(11);
        let cam = camera_at(400.0, -250.0);
        assert_eq!(field.visible_stars(&cam), field.visible_stars(&cam));
    }

    #[test]
    fn test_far_layer_scrolls_slower() {
        let field = StarField::new(21);
        let a = field.visible_stars(&camera_at(0.0, 0.0));
        let b = field.visible_stars(&camera_at(10.0, 0.0));
        // A far-layer star seen in both frames shifts by parallax * 10 = 2 px
        let far = a
            .iter()
            .filter(|s| s.screen_pos.x > 50.0)
            .find(|s| {
                b.iter().any(|t| {
                    (t.screen_pos - (s.screen_pos - Vec2::new(2.0, 0.0))).length() < 1e-3
                })
            });
        assert!(far.is_some());
    }
}
