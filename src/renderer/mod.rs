//! Render snapshots
//!
//! The simulation never draws. After each tick the host captures a
//! [`FrameSnapshot`] and hands it to whatever [`Renderer`] it uses.

pub mod text;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityRef, GamePhase, GameState, ProjectileKind, Tier};

pub use text::TextRenderer;

/// What an entity looks like, the only visual information the core exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    Player,
    Adversary(Tier),
    PlayerShot,
    AdversaryShot,
    CoverBlock,
    Flyer,
}

impl VisualKind {
    /// Suggested RGBA fill
    pub fn color(self) -> [f32; 4] {
        match self {
            VisualKind::Player => [0.2, 1.0, 0.3, 1.0],
            VisualKind::Adversary(Tier::Top) => [0.9, 0.3, 0.9, 1.0],
            VisualKind::Adversary(Tier::Middle) => [0.3, 0.8, 1.0, 1.0],
            VisualKind::Adversary(Tier::Bottom) => [1.0, 1.0, 1.0, 1.0],
            VisualKind::PlayerShot => [1.0, 1.0, 0.4, 1.0],
            VisualKind::AdversaryShot => [1.0, 0.4, 0.2, 1.0],
            VisualKind::CoverBlock => [0.1, 0.9, 0.2, 1.0],
            VisualKind::Flyer => [1.0, 0.1, 0.1, 1.0],
        }
    }
}

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: VisualKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Animation frame (adversaries alternate 0/1, everything else 0)
    pub frame: u8,
}

impl Sprite {
    fn from_entity(entity: EntityRef<'_>) -> Self {
        let (kind, frame) = match entity {
            EntityRef::Player(_) => (VisualKind::Player, 0),
            EntityRef::Adversary(a) => (VisualKind::Adversary(a.tier()), a.frame),
            EntityRef::Projectile(p) => match p.kind {
                ProjectileKind::Player => (VisualKind::PlayerShot, 0),
                ProjectileKind::Adversary => (VisualKind::AdversaryShot, 0),
            },
            EntityRef::CoverBlock(_) => (VisualKind::CoverBlock, 0),
            EntityRef::Flyer(_) => (VisualKind::Flyer, 0),
        };
        let bounds = entity.bounds();
        Self {
            kind,
            pos: bounds.pos,
            size: bounds.size,
            frame,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub wave: u32,
    /// Active entities, back to front
    pub sprites: Vec<Sprite>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            wave: state.wave,
            sprites: state
                .store
                .iter_active()
                .map(Sprite::from_entity)
                .collect(),
        }
    }

    pub fn count(&self, kind: VisualKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}

/// Drawing collaborator
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot);
}
