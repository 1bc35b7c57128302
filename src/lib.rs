//! Formation Assault - a tick-stepped formation shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formation, projectiles, collisions, game state)
//! - `renderer`: Frame snapshots for a drawing collaborator, plus a terminal rasterizer
//! - `audio`: Discrete audio cues and the sink seam for a synthesizer
//! - `settings`: Host preferences loaded from JSON

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioManager};
pub use renderer::{FrameSnapshot, Sprite, VisualKind};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal host tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_Y: f32 = PLAYFIELD_HEIGHT - 50.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Formation layout
    pub const FORMATION_ROWS: u8 = 5;
    pub const FORMATION_COLUMNS: u8 = 11;
    pub const ADVERSARY_WIDTH: f32 = 30.0;
    pub const ADVERSARY_HEIGHT: f32 = 20.0;
    pub const ADVERSARY_SPACING_X: f32 = 45.0;
    pub const ADVERSARY_SPACING_Y: f32 = 35.0;
    pub const FORMATION_TOP: f32 = 80.0;
    /// Extra start depth per wave, and its cap (5 waves' worth)
    pub const WAVE_ROW_OFFSET: f32 = 20.0;
    pub const MAX_WAVE_ROW_OFFSET: f32 = 100.0;

    /// Formation movement
    pub const FORMATION_BASE_INTERVAL: u32 = 30;
    pub const FORMATION_STEP_X: f32 = 8.0;
    pub const FORMATION_DROP_Y: f32 = 15.0;
    pub const FORMATION_EDGE_MARGIN: f32 = 20.0;
    pub const SPEED_INITIAL: f32 = 1.0;
    pub const SPEED_MAX: f32 = 3.0;
    pub const SPEED_DROP_INCREMENT: f32 = 0.1;
    pub const SPEED_KILL_INCREMENT: f32 = 0.02;
    pub const SPEED_PER_WAVE: f32 = 0.2;
    /// Distance from the playfield bottom that counts as an invasion
    pub const INVASION_MARGIN: f32 = 60.0;
    /// Number of march-beat cues in rotation
    pub const MARCH_BEATS: u8 = 4;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 3.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    pub const PLAYER_SHOT_SPEED: f32 = -10.0;
    pub const ADVERSARY_SHOT_SPEED: f32 = 5.0;
    pub const ADVERSARY_FIRE_CHANCE: f64 = 0.02;

    /// Cover structures
    pub const COVER_COUNT: usize = 4;
    pub const COVER_CELL_SIZE: f32 = 4.0;
    pub const COVER_PATTERN_WIDTH: usize = 12;
    pub const COVER_PATTERN_HEIGHT: usize = 8;
    pub const COVER_TOP: f32 = PLAYFIELD_HEIGHT - 130.0;
    pub const COVER_EXPLOSION_RADIUS: f32 = 8.0;

    /// Bonus flyer
    pub const FLYER_WIDTH: f32 = 48.0;
    pub const FLYER_HEIGHT: f32 = 20.0;
    pub const FLYER_Y: f32 = 40.0;
    pub const FLYER_SPEED: f32 = 2.0;
    pub const FLYER_MIN_INTERVAL: u32 = 1200;
    pub const FLYER_MAX_INTERVAL: u32 = 1800;
    pub const FLYER_REWARDS: [u32; 5] = [50, 100, 150, 200, 300];

    /// Scoring
    pub const BONUS_LIFE_SCORE: u64 = 1500;
}
