//! Simulation module
//!
//! All gameplay logic lives here:
//! - Entities walked in stable id order
//! - Systems run strictly in sequence: movement, collision, drag
//! - No rendering or audio; side effects are queued for the host

pub mod collision;
pub mod drag;
pub mod entity;
pub mod movement;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{CollisionSystem, aabb_overlap};
pub use drag::{DragSystem, TouchEvent, TouchPhase};
pub use entity::{Entities, Entity, EntityId, EntityKind, Rect};
pub use movement::MovementSystem;
pub use placement::{Placement, SpawnRegion, place};
pub use state::{GameEvent, GamePhase, GameState, SpeedRamp};
pub use tick::{Systems, TickInput, tick};
