//! Entity store
//!
//! Owns every live entity. Membership changes are pushes and flag flips;
//! inactive entries are compacted once per tick so iteration order stays the
//! insertion order (adversaries by row then column, projectiles by id).

use serde::{Deserialize, Serialize};

use super::entity::{
    Adversary, CoverBlock, CoverStructure, Flyer, Player, Projectile, ProjectileKind,
};
use super::geom::Rect;
use crate::consts::*;

/// Borrowed view of a single entity, one variant per entity kind
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Adversary(&'a Adversary),
    Projectile(&'a Projectile),
    CoverBlock(&'a CoverBlock),
    Flyer(&'a Flyer),
}

impl EntityRef<'_> {
    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Player(p) => p.bounds,
            EntityRef::Adversary(a) => a.bounds,
            EntityRef::Projectile(p) => p.bounds,
            EntityRef::CoverBlock(b) => b.bounds,
            EntityRef::Flyer(f) => f.bounds,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            EntityRef::Player(p) => p.active,
            EntityRef::Adversary(a) => a.active,
            EntityRef::Projectile(p) => p.active,
            EntityRef::CoverBlock(b) => b.active,
            EntityRef::Flyer(f) => f.active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub player: Player,
    /// Formation members, stable (row, column) order
    pub adversaries: Vec<Adversary>,
    /// In-flight projectiles, insertion order
    pub projectiles: Vec<Projectile>,
    pub covers: Vec<CoverStructure>,
    pub flyer: Option<Flyer>,
    next_id: u32,
}

impl EntityStore {
    /// Drop everything and place a fresh player
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Allocate a new projectile id
    fn next_entity_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Build the formation grid with its top row at `top`
    pub fn spawn_formation(&mut self, top: f32) {
        self.adversaries.clear();
        let grid_width =
            (FORMATION_COLUMNS - 1) as f32 * ADVERSARY_SPACING_X + ADVERSARY_WIDTH;
        let left = (PLAYFIELD_WIDTH - grid_width) / 2.0;
        for row in 0..FORMATION_ROWS {
            for column in 0..FORMATION_COLUMNS {
                self.adversaries.push(Adversary::new(
                    row,
                    column,
                    left + column as f32 * ADVERSARY_SPACING_X,
                    top + row as f32 * ADVERSARY_SPACING_Y,
                ));
            }
        }
    }

    /// Build the cover structures, evenly spaced across the playfield
    pub fn spawn_covers(&mut self) {
        self.covers = (0..COVER_COUNT)
            .map(|i| {
                let center = PLAYFIELD_WIDTH * (i + 1) as f32 / (COVER_COUNT + 1) as f32;
                CoverStructure::build(center - CoverStructure::width() / 2.0, COVER_TOP)
            })
            .collect();
    }

    /// Add a projectile and return its id
    pub fn add_projectile(&mut self, kind: ProjectileKind, center_x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, kind, center_x, y));
        id
    }

    pub fn active_adversaries(&self) -> impl Iterator<Item = &Adversary> {
        self.adversaries.iter().filter(|a| a.active)
    }

    pub fn active_adversary_count(&self) -> usize {
        self.active_adversaries().count()
    }

    pub fn active_player_shot(&self) -> Option<&Projectile> {
        self.projectiles
            .iter()
            .find(|p| p.active && p.kind == ProjectileKind::Player)
    }

    /// Active entities whose bounds overlap `area`
    pub fn query(&self, area: &Rect) -> Vec<EntityRef<'_>> {
        self.iter_active()
            .filter(|e| e.bounds().intersects(area))
            .collect()
    }

    /// Every active entity: covers, adversaries, flyer, projectiles, player
    pub fn iter_active(&self) -> impl Iterator<Item = EntityRef<'_>> {
        let covers = self
            .covers
            .iter()
            .flat_map(|c| c.blocks.iter())
            .map(EntityRef::CoverBlock);
        let adversaries = self.adversaries.iter().map(EntityRef::Adversary);
        let flyer = self.flyer.iter().map(EntityRef::Flyer);
        let projectiles = self.projectiles.iter().map(EntityRef::Projectile);
        let player = std::iter::once(EntityRef::Player(&self.player));

        covers
            .chain(adversaries)
            .chain(flyer)
            .chain(projectiles)
            .chain(player)
            .filter(|e| e.is_active())
    }

    /// Remove deactivated adversaries, projectiles and the flyer.
    /// Cover cells keep their slot so structure layout stays fixed.
    pub fn compact(&mut self) {
        self.adversaries.retain(|a| a.active);
        self.projectiles.retain(|p| p.active);
        if self.flyer.as_ref().is_some_and(|f| !f.active) {
            self.flyer = None;
        }
    }
}
