//! Logical input state
//!
//! The input adapter flips held booleans asynchronously; the session samples
//! them once per frame and turns fire/pause into rising-edge triggers.

/// Held controls, as last reported by the input adapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub pause: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire was pressed this frame (rising edge only)
    pub fire: bool,
}

/// Remembers last frame's held buttons to detect presses
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTracker {
    prev_fire: bool,
    prev_pause: bool,
}

impl EdgeTracker {
    /// Sample held input, returning the tick command and whether pause was pressed
    pub fn sample(&mut self, held: &InputState) -> (TickInput, bool) {
        let fire_pressed = held.fire && !self.prev_fire;
        let pause_pressed = held.pause && !self.prev_pause;
        self.prev_fire = held.fire;
        self.prev_pause = held.pause;

        let tick = TickInput {
            thrust: held.thrust,
            turn_left: held.turn_left,
            turn_right: held.turn_right,
            fire: fire_pressed,
        };
        (tick, pause_pressed)
    }

    /// Forget held state (session restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_only_on_rising_edge() {
        let mut edges = EdgeTracker::default();
        let held = InputState {
            fire: true,
            ..Default::default()
        };

        let (first, _) = edges.sample(&held);
        let (second, _) = edges.sample(&held);
        assert!(first.fire);
        assert!(!second.fire, "holding fire must not auto-repeat");

        edges.sample(&InputState::default());
        let (again, _) = edges.sample(&held);
        assert!(again.fire);
    }

    #[test]
    fn test_pause_edge_and_held_controls() {
        let mut edges = EdgeTracker::default();
        let held = InputState {
            thrust: true,
            turn_left: true,
            pause: true,
            ..Default::default()
        };
        let (tick, pause) = edges.sample(&held);
        assert!(pause);
        assert!(tick.thrust && tick.turn_left && !tick.turn_right);

        let (_, pause) = edges.sample(&held);
        assert!(!pause);
    }
}
