//! Collision and damage resolution
//!
//! Runs once per tick after everything has moved. Each active projectile is
//! checked against cover first, then the flyer, then the formation (player
//! shots) or the player (adversary shots). A projectile resolves at most one
//! contact. Cover goes first so it always shields whatever is behind it.

use glam::Vec2;

use super::entity::{Adversary, CoverStructure, ProjectileKind};
use super::geom::Rect;
use super::state::{GameEvent, GameOverCause, GameState};
use crate::audio::AudioCue;
use crate::consts::*;

/// True when any active adversary has reached the invasion line
pub fn invasion_reached(adversaries: &[Adversary]) -> bool {
    let line = PLAYFIELD_HEIGHT - INVASION_MARGIN;
    adversaries
        .iter()
        .filter(|a| a.active)
        .any(|a| a.bounds.bottom() >= line)
}

/// Destroy every active cover block whose center lies within the explosion
/// radius of `center`. Returns how many blocks were destroyed.
pub fn explode_cover(covers: &mut [CoverStructure], center: Vec2) -> usize {
    let mut destroyed = 0;
    for block in covers
        .iter_mut()
        .flat_map(|c| c.blocks.iter_mut())
        .filter(|b| b.active)
    {
        if block.bounds.center().distance(center) <= COVER_EXPLOSION_RADIUS {
            block.active = false;
            destroyed += 1;
        }
    }
    destroyed
}

/// Find the first active block overlapping `area` and blow a hole around it.
/// Returns the hit block's center.
pub fn strike_cover(covers: &mut [CoverStructure], area: &Rect) -> Option<Vec2> {
    let center = covers
        .iter()
        .flat_map(|c| c.blocks.iter())
        .find(|b| b.active && b.bounds.intersects(area))?
        .bounds
        .center();
    let destroyed = explode_cover(covers, center);
    log::debug!("Cover hit at {center}, {destroyed} blocks destroyed");
    Some(center)
}

/// Resolve every contact for this tick and report what happened.
///
/// Lives are decremented here; score, wave and phase changes are left to
/// progression, which consumes the returned events.
pub fn resolve(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if invasion_reached(&state.store.adversaries) {
        events.push(GameEvent::GameOver {
            cause: GameOverCause::Invasion,
        });
        return events;
    }

    let GameState {
        store,
        formation,
        flyer_schedule,
        rng,
        lives,
        cues,
        ..
    } = state;

    for i in 0..store.projectiles.len() {
        if !store.projectiles[i].active {
            continue;
        }
        let shot = store.projectiles[i].bounds;
        let kind = store.projectiles[i].kind;

        if strike_cover(&mut store.covers, &shot).is_some() {
            store.projectiles[i].active = false;
            continue;
        }

        match kind {
            ProjectileKind::Player => {
                if let Some(flyer) = store
                    .flyer
                    .as_mut()
                    .filter(|f| f.active && f.bounds.intersects(&shot))
                {
                    flyer.active = false;
                    store.projectiles[i].active = false;
                    events.push(GameEvent::FlyerDestroyed {
                        reward: flyer.reward,
                    });
                    cues.push(AudioCue::FlyerExplosion);
                    cues.push(AudioCue::FlyerSirenStop);
                    flyer_schedule.redraw(rng);
                    continue;
                }

                let hit = store
                    .adversaries
                    .iter_mut()
                    .find(|a| a.active && a.bounds.intersects(&shot));
                if let Some(adversary) = hit {
                    adversary.active = false;
                    let tier = adversary.tier();
                    store.projectiles[i].active = false;
                    events.push(GameEvent::AdversaryDestroyed {
                        tier,
                        points: tier.points(),
                    });
                    cues.push(AudioCue::AdversaryExplosion);
                    formation.on_kill();
                    if store.active_adversary_count() == 0 {
                        events.push(GameEvent::FormationCleared);
                    }
                }
            }
            ProjectileKind::Adversary => {
                if store.player.active && store.player.bounds.intersects(&shot) {
                    store.projectiles[i].active = false;
                    *lives = lives.saturating_sub(1);
                    events.push(GameEvent::PlayerHit);
                    cues.push(AudioCue::PlayerDeath);
                    if *lives == 0 {
                        events.push(GameEvent::GameOver {
                            cause: GameOverCause::OutOfLives,
                        });
                        return events;
                    }
                }
            }
        }
    }

    events
}
