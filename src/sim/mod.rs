//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform free:
//! - One tick per display frame, frame-counted timers only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or DOM dependencies

pub mod camera;
pub mod collision;
pub mod events;
pub mod explosion;
pub mod input;
pub mod progression;
pub mod projectile;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod station;
pub mod tick;

pub use camera::Camera;
pub use collision::{circles_overlap, resolve_collisions};
pub use events::{EffectSink, GameEvent};
pub use explosion::Explosion;
pub use input::{EdgeTracker, InputState, TickInput};
pub use progression::Progression;
pub use projectile::Projectile;
pub use ship::{Ship, ShipStatus};
pub use snapshot::{RenderFrame, ShipView};
pub use state::{GamePhase, SimulationState};
pub use station::{Station, StationState, StationTarget, step_fire_control};
pub use tick::tick;
