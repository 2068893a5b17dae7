//! Explosion effects: grow, fade, disappear

use glam::Vec2;

/// Scale at creation
pub const EXPLOSION_START_SCALE: f32 = 0.5;
/// Scale growth per frame
pub const EXPLOSION_GROWTH: f32 = 0.05;
/// Alpha lost per frame
pub const EXPLOSION_FADE: f32 = 0.02;

/// A fading explosion sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
    pub frame: u32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            scale: EXPLOSION_START_SCALE,
            alpha: 1.0,
            frame: 0,
        }
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.scale += EXPLOSION_GROWTH;
        self.alpha = (self.alpha - EXPLOSION_FADE).max(0.0);
        self.frame += 1;
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Advance every explosion and drop the finished ones
pub fn update_explosions(explosions: &mut Vec<Explosion>) {
    for e in explosions.iter_mut() {
        e.update();
    }
    explosions.retain(|e| !e.is_done());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_lifecycle() {
        let mut list = vec![Explosion::new(Vec2::new(3.0, 4.0))];
        let mut last_scale = list[0].scale;
        let mut frames = 0;
        while !list.is_empty() {
            let alpha = list[0].alpha;
            update_explosions(&mut list);
            if let Some(e) = list.first() {
                assert!(e.scale > last_scale);
                assert!(e.alpha < alpha);
                last_scale = e.scale;
            }
            frames += 1;
            assert!(frames < 200, "explosion never finished");
        }
        assert!((48..=52).contains(&frames));
    }
}
