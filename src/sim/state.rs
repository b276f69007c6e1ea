//! Game state and core simulation types
//!
//! The single source of truth for a session: phase, level, fall speed,
//! survival time, the player, and the falling-object registry. All
//! transitions funnel through the methods here; invalid ones are silent
//! no-ops since duplicate UI clicks are expected.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clamp_x;
use crate::consts::*;

use super::registry::Registry;
use super::timers::{TimerId, Timers};

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before the first start action
    Idle,
    /// Active survival
    Playing,
    /// Run ended by a fatal collision
    GameOver,
}

/// Input mode, chosen once per session from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Discrete left/right impulses while a direction key is held
    Keys,
    /// Player x snaps to the clamped pointer position
    Pointer,
}

impl ControlMode {
    /// Narrow viewports get pointer-follow (touch), wide ones get keys
    pub fn for_viewport(width: f32) -> Self {
        if width < TOUCH_WIDTH_THRESHOLD {
            ControlMode::Pointer
        } else {
            ControlMode::Keys
        }
    }
}

/// The player sprite, confined to horizontal movement
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    /// Spawn at horizontal center, a fixed offset above the bottom edge
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width / 2.0, height - PLAYER_BOTTOM_OFFSET),
        }
    }

    pub fn step_left(&mut self, width: f32) {
        self.pos.x = clamp_x(self.pos.x - PLAYER_STEP, width);
    }

    pub fn step_right(&mut self, width: f32) {
        self.pos.x = clamp_x(self.pos.x + PLAYER_STEP, width);
    }

    /// Pointer-follow: snap to the clamped pointer position
    pub fn follow_pointer(&mut self, pointer_x: f32, width: f32) {
        self.pos.x = clamp_x(pointer_x, width);
    }
}

/// An active falling object
#[derive(Debug, Clone, Copy)]
pub struct FallingObject {
    pub id: u32,
    pub pos: Vec2,
}

impl FallingObject {
    /// Whether the object's fatal bounding box contains a point
    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.pos.x).abs() <= OBJECT_HALF_WIDTH
            && (point.y - self.pos.y).abs() <= OBJECT_HALF_HEIGHT
    }
}

/// State-change notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Survival time changed (also fired with 0 on start/restart)
    ScoreUpdate(u32),
    /// Fatal collision ended the run
    GameOver { final_secs: u32 },
    /// Level counter changed (start, restart, level advance)
    LevelChanged(u32),
    /// The periodic level-advance offer is open
    LevelAdvanceOffered,
    /// A restart action is now valid
    RestartAvailable,
}

/// Receives state-change notifications; implemented by the frontend.
/// The core only emits state, it never reads rendering back.
pub trait PresentationSink {
    fn on_score_update(&mut self, elapsed_secs: u32);
    fn on_game_over(&mut self, final_secs: u32);
    fn on_level_changed(&mut self, level: u32);
    fn on_level_advance_offered(&mut self);
    fn on_restart_available(&mut self);
}

impl GameEvent {
    pub fn dispatch(self, sink: &mut impl PresentationSink) {
        match self {
            GameEvent::ScoreUpdate(secs) => sink.on_score_update(secs),
            GameEvent::GameOver { final_secs } => sink.on_game_over(final_secs),
            GameEvent::LevelChanged(level) => sink.on_level_changed(level),
            GameEvent::LevelAdvanceOffered => sink.on_level_advance_offered(),
            GameEvent::RestartAvailable => sink.on_restart_available(),
        }
    }
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Session seed for reproducible spawns
    pub seed: u64,
    pub phase: GamePhase,
    /// Current level, starts at 1
    pub level: u32,
    /// Fall speed of every active object, units per tick
    pub fall_speed: f32,
    /// Survival time; frozen once the phase is GameOver
    pub elapsed_secs: u32,
    /// Arena dimensions
    pub width: f32,
    pub height: f32,
    pub control_mode: ControlMode,
    pub player: Player,
    pub objects: Registry,
    pub timers: Timers,
    pub spawn_timer: TimerId,
    pub survival_timer: TimerId,
    pub offer_timer: TimerId,
    /// A level-advance offer is open; spawn/survival cadence is stalled
    pub offer_pending: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, width: f32, height: f32, control_mode: ControlMode) -> Self {
        // Floor degenerate viewports so the playable band is never empty
        let width = width.max(2.0 * EDGE_MARGIN);
        let height = height.max(PLAYER_BOTTOM_OFFSET);

        let mut timers = Timers::new();
        let spawn_timer = timers.schedule(SPAWN_PERIOD_TICKS, true);
        let survival_timer = timers.schedule(SURVIVAL_PERIOD_TICKS, true);
        let offer_timer = timers.schedule(OFFER_PERIOD_TICKS, true);
        // Nothing fires until the first start action
        timers.pause_all();

        Self {
            seed,
            phase: GamePhase::Idle,
            level: 1,
            fall_speed: BASE_FALL_SPEED,
            elapsed_secs: 0,
            width,
            height,
            control_mode,
            player: Player::new(width, height),
            objects: Registry::new(),
            timers,
            spawn_timer,
            survival_timer,
            offer_timer,
            offer_pending: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Begin the session. Valid from Idle or GameOver; a start while
    /// already Playing is ignored.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Idle => {
                self.phase = GamePhase::Playing;
                self.rearm_timers();
                log::info!("session started (seed {})", self.seed);
                self.push_event(GameEvent::ScoreUpdate(0));
                self.push_event(GameEvent::LevelChanged(self.level));
            }
            // Same user intent as restart; keep one reset path
            GamePhase::GameOver => self.restart(),
            GamePhase::Playing => {
                log::debug!("start ignored while playing");
            }
        }
    }

    /// Reset every counter to its initial value and re-enter Playing.
    /// Valid from GameOver only.
    pub fn restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::debug!("restart ignored in {:?}", self.phase);
            return;
        }
        self.level = 1;
        self.fall_speed = BASE_FALL_SPEED;
        self.elapsed_secs = 0;
        self.offer_pending = false;
        self.objects.clear();
        self.player = Player::new(self.width, self.height);
        self.rearm_timers();
        self.phase = GamePhase::Playing;
        log::info!("restarted");
        self.push_event(GameEvent::ScoreUpdate(0));
        self.push_event(GameEvent::LevelChanged(self.level));
    }

    /// A falling object overlapped the player. Freezes survival time and
    /// stops all cadence; valid only while Playing.
    pub fn report_fatal_collision(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.offer_pending = false;
        self.timers.pause_all();
        log::info!(
            "game over after {}s at level {}",
            self.elapsed_secs,
            self.level
        );
        self.push_event(GameEvent::GameOver {
            final_secs: self.elapsed_secs,
        });
        self.push_event(GameEvent::RestartAvailable);
    }

    /// Open the periodic level-advance offer. Spawn and survival cadence
    /// stall until the player accepts; objects already falling keep
    /// falling. No effect outside Playing.
    pub fn offer_level_advance(&mut self) {
        if self.phase != GamePhase::Playing || self.offer_pending {
            return;
        }
        self.offer_pending = true;
        self.timers.pause(self.spawn_timer);
        self.timers.pause(self.survival_timer);
        self.timers.pause(self.offer_timer);
        log::info!("level advance offered at level {}", self.level);
        self.push_event(GameEvent::LevelAdvanceOffered);
    }

    /// Accept an open offer: bump level and fall speed, restart all
    /// period timers from zero. Ignored when no offer is pending.
    pub fn accept_level_advance(&mut self) {
        if self.phase != GamePhase::Playing || !self.offer_pending {
            log::debug!("level advance ignored without a pending offer");
            return;
        }
        self.offer_pending = false;
        self.level += 1;
        self.fall_speed += FALL_SPEED_STEP;
        self.rearm_timers();
        log::info!(
            "advanced to level {} (fall speed {:.1})",
            self.level,
            self.fall_speed
        );
        self.push_event(GameEvent::LevelChanged(self.level));
    }

    /// Restart all three period timers from their full periods
    fn rearm_timers(&mut self) {
        self.timers.reset(self.spawn_timer, SPAWN_PERIOD_TICKS);
        self.timers.reset(self.survival_timer, SURVIVAL_PERIOD_TICKS);
        self.timers.reset(self.offer_timer, OFFER_PERIOD_TICKS);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forward and clear all pending notifications
    pub fn flush_events(&mut self, sink: &mut impl PresentationSink) {
        for event in self.drain_events() {
            event.dispatch(sink);
        }
    }
}
