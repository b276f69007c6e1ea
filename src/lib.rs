//! Drop Dodge - a falling-object dodge survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, timers, motion/collision)
//! - `settings`: User preferences persisted in LocalStorage
//!
//! Rendering and input are thin DOM glue in the binary; the sim never
//! touches the platform and only emits `GameEvent`s for a presentation sink.

pub mod settings;
pub mod sim;

pub use settings::{ControlOverride, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per browser frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Sim ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Horizontal keep-out margin on both arena edges
    pub const EDGE_MARGIN: f32 = 50.0;
    /// Player's fixed height above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;
    /// Player step per tick while a direction key is held
    pub const PLAYER_STEP: f32 = 10.0;

    /// Fall speed at level 1 (units per tick)
    pub const BASE_FALL_SPEED: f32 = 5.0;
    /// Fall speed gained per level advance
    pub const FALL_SPEED_STEP: f32 = 0.3;

    /// Half extents of a falling object's fatal bounding box
    pub const OBJECT_HALF_WIDTH: f32 = 24.0;
    pub const OBJECT_HALF_HEIGHT: f32 = 24.0;

    /// One object spawned per simulated second
    pub const SPAWN_PERIOD_TICKS: u32 = TICKS_PER_SECOND;
    /// Survival time accrues once per simulated second
    pub const SURVIVAL_PERIOD_TICKS: u32 = TICKS_PER_SECOND;
    /// Level-advance offer every 20 simulated seconds
    pub const OFFER_PERIOD_TICKS: u32 = 20 * TICKS_PER_SECOND;

    /// Viewport width below which pointer-follow controls are selected
    pub const TOUCH_WIDTH_THRESHOLD: f32 = 768.0;
}

/// Clamp a horizontal position to the playable band. A width at the
/// degenerate minimum collapses the band to a single column.
#[inline]
pub fn clamp_x(x: f32, width: f32) -> f32 {
    let max = (width - consts::EDGE_MARGIN).max(consts::EDGE_MARGIN);
    x.clamp(consts::EDGE_MARGIN, max)
}
