//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod motion;
pub mod registry;
pub mod state;
pub mod tick;
pub mod timers;

pub use registry::{Registry, Visit};
pub use state::{
    ControlMode, FallingObject, GameEvent, GamePhase, GameState, Player, PresentationSink,
};
pub use tick::{TickInput, tick};
pub use timers::{TimerId, Timers};
