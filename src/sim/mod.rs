//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, motion is tick-quantized
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (formation by row/column, projectiles by id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod flyer;
pub mod formation;
pub mod geom;
pub mod progression;
pub mod projectile;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{explode_cover, invasion_reached, resolve, strike_cover};
pub use entity::{
    Adversary, CoverBlock, CoverStructure, Flyer, Player, Projectile, ProjectileKind, Tier,
};
pub use flyer::FlyerSchedule;
pub use formation::{FormationState, StepOutcome, wave_base_speed, wave_row_offset};
pub use geom::Rect;
pub use state::{GameEvent, GameOverCause, GamePhase, GameState};
pub use store::{EntityRef, EntityStore};
pub use tick::{TickInput, tick};
