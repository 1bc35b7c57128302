//! Fixed-rate simulation tick
//!
//! Core game loop that advances the simulation deterministically. Phases run
//! in a fixed order: input, projectiles, formation, flyer, collisions,
//! progression, compaction.

use super::collision::resolve;
use super::progression;
use super::projectile::{
    advance_projectiles, fire_player_shot, roll_adversary_fire, shooter_candidates,
};
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New movement intent `(left, right)`; `None` keeps the current intent
    pub movement: Option<(bool, bool)>,
    /// New firing intent; `None` keeps the current intent
    pub firing: Option<bool>,
    /// Start signal (from the start screen)
    pub start: bool,
    /// Restart signal (full reset)
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    } else if input.start {
        state.start();
    }
    if input.pause {
        state.toggle_pause();
    }

    // Nothing simulates outside of Playing
    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    if let Some((left, right)) = input.movement {
        state.set_movement(left, right);
    }
    if let Some(firing) = input.firing {
        state.set_firing(firing);
    }

    state.time_ticks += 1;

    // Player input, then projectiles
    state.store.player.apply_movement();
    fire_player_shot(&mut state.store, &mut state.cues);
    roll_adversary_fire(&mut state.store, &mut state.rng);
    advance_projectiles(&mut state.store);

    state
        .formation
        .advance(&mut state.store.adversaries, &mut state.cues);

    state
        .flyer_schedule
        .update(&mut state.store.flyer, &mut state.rng, &mut state.cues);

    let combat = resolve(state);
    progression::apply(state, combat);

    state.store.compact();
}

/// Steer under the nearest frontmost adversary and keep the trigger held
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player_x = state.store.player.center_x();
    let target = shooter_candidates(&state.store.adversaries)
        .into_iter()
        .map(|a| a.bounds.center().x)
        .min_by(|a, b| {
            (a - player_x)
                .abs()
                .partial_cmp(&(b - player_x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    input.movement = Some(match target {
        Some(x) if x < player_x - 2.0 => (true, false),
        Some(x) if x > player_x + 2.0 => (false, true),
        _ => (false, false),
    });
    input.firing = Some(true);
}
