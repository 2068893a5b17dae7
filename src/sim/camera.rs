//! Camera: the viewport's top-left corner in world space, recentred on the ship

use glam::Vec2;

/// World-space view rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Top-left corner in world space
    pub offset: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    /// Camera centred on `focus`
    pub fn centered_on(focus: Vec2, viewport: Vec2) -> Self {
        Self {
            offset: focus - viewport * 0.5,
            viewport,
        }
    }

    /// World position to screen position
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// True when `world` lies inside the view padded by `margin` on every side
    pub fn contains(&self, world: Vec2, margin: f32) -> bool {
        let min = self.offset - Vec2::splat(margin);
        let max = self.offset + self.viewport + Vec2::splat(margin);
        world.x > min.x && world.x < max.x && world.y > min.y && world.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_on_ship() {
        let cam = Camera::centered_on(Vec2::new(100.0, 50.0), Vec2::new(800.0, 600.0));
        assert_eq!(cam.offset, Vec2::new(-300.0, -250.0));
        assert_eq!(cam.to_screen(Vec2::new(100.0, 50.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_contains_with_margin() {
        let cam = Camera::centered_on(Vec2::ZERO, Vec2::new(800.0, 600.0));
        assert!(cam.contains(Vec2::new(449.0, 0.0), 50.0));
        assert!(!cam.contains(Vec2::new(451.0, 0.0), 50.0));
        assert!(!cam.contains(Vec2::new(0.0, -351.0), 50.0));
        assert!(!cam.contains(Vec2::new(420.0, 0.0), 0.0));
    }
}
