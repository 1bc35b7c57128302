//! Projectile spawning and advancement

use std::collections::BTreeMap;

use rand::Rng;

use super::entity::{Adversary, ProjectileKind};
use super::store::EntityStore;
use crate::audio::AudioCue;
use crate::consts::*;

/// Fire a player shot if the trigger is held and no shot is in flight.
/// Returns true when a shot was spawned.
pub fn fire_player_shot(store: &mut EntityStore, cues: &mut Vec<AudioCue>) -> bool {
    if !store.player.firing || store.active_player_shot().is_some() {
        return false;
    }
    let center_x = store.player.center_x();
    let y = store.player.bounds.top() - PROJECTILE_HEIGHT;
    store.add_projectile(ProjectileKind::Player, center_x, y);
    cues.push(AudioCue::Shoot);
    true
}

/// Frontmost active adversary of each column, ordered by column
pub fn shooter_candidates(adversaries: &[Adversary]) -> Vec<&Adversary> {
    let mut front: BTreeMap<u8, &Adversary> = BTreeMap::new();
    for a in adversaries.iter().filter(|a| a.active) {
        front
            .entry(a.column)
            .and_modify(|cur| {
                if a.row > cur.row {
                    *cur = a;
                }
            })
            .or_insert(a);
    }
    front.into_values().collect()
}

/// Roll the per-tick fire chance and, on success, fire from a random
/// frontmost adversary. Returns true when a shot was spawned.
pub fn roll_adversary_fire(store: &mut EntityStore, rng: &mut impl Rng) -> bool {
    if store.active_adversary_count() == 0 || !rng.random_bool(ADVERSARY_FIRE_CHANCE) {
        return false;
    }
    let muzzle = {
        let candidates = shooter_candidates(&store.adversaries);
        let shooter = candidates[rng.random_range(0..candidates.len())];
        (shooter.bounds.center().x, shooter.bounds.bottom())
    };
    store.add_projectile(ProjectileKind::Adversary, muzzle.0, muzzle.1);
    true
}

/// Move every active projectile and retire those that left the playfield
pub fn advance_projectiles(store: &mut EntityStore) {
    for p in store.projectiles.iter_mut() {
        p.advance();
    }
}
