//! Scoring and wave progression
//!
//! Reacts to the resolver's combat events: awards points, grants the one-time
//! bonus life, ends the run, or re-seeds the next wave in place.

use super::formation::{FormationState, wave_row_offset};
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::AudioCue;
use crate::consts::*;

/// Apply one tick's combat events and forward them to the host queue
pub fn apply(state: &mut GameState, combat: Vec<GameEvent>) {
    let game_over = combat
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. }));

    for event in combat {
        state.events.push(event);
        match event {
            GameEvent::AdversaryDestroyed { points, .. } => add_score(state, points),
            GameEvent::FlyerDestroyed { reward } => add_score(state, reward),
            GameEvent::PlayerHit => state.events.push(GameEvent::LivesChanged(state.lives)),
            GameEvent::GameOver { cause } => {
                log::info!(
                    "Game over ({cause:?}) at wave {} with {} points",
                    state.wave,
                    state.score
                );
                state.set_phase(GamePhase::GameOver);
            }
            GameEvent::FormationCleared if !game_over => advance_wave(state),
            _ => {}
        }
    }
}

/// Add points and grant the bonus life the first time the threshold is met
pub fn add_score(state: &mut GameState, points: u32) {
    state.score += u64::from(points);
    state.events.push(GameEvent::ScoreChanged(state.score));

    if !state.bonus_life_awarded && state.score >= BONUS_LIFE_SCORE {
        state.bonus_life_awarded = true;
        state.lives = state.lives.saturating_add(1);
        log::info!("Bonus life at {} points", state.score);
        state.events.push(GameEvent::BonusLife);
        state.events.push(GameEvent::LivesChanged(state.lives));
    }
}

/// Rebuild the formation for the next wave; score, lives and cover persist
pub fn advance_wave(state: &mut GameState) {
    state.wave += 1;

    state.store.projectiles.clear();
    if state.store.flyer.take().is_some_and(|f| f.active) {
        state.cues.push(AudioCue::FlyerSirenStop);
    }
    let top = FORMATION_TOP + wave_row_offset(state.wave);
    state.store.spawn_formation(top);
    state.formation = FormationState::for_wave(state.wave);
    state.flyer_schedule.redraw(&mut state.rng);

    log::info!(
        "Wave {}: formation top {}, base speed {:.1}",
        state.wave,
        top,
        state.formation.base_speed
    );
    state.events.push(GameEvent::WaveChanged(state.wave));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Flyer, ProjectileKind, Tier};
    use crate::sim::formation::wave_base_speed;
    use crate::sim::state::GameOverCause;

    fn playing() -> GameState {
        let mut state = GameState::new(5);
        state.start();
        state.drain_events();
        state
    }

    fn kill(points: u32) -> GameEvent {
        GameEvent::AdversaryDestroyed {
            tier: Tier::Top,
            points,
        }
    }

    #[test]
    fn test_kill_adds_points() {
        let mut state = playing();
        apply(
            &mut state,
            vec![kill(30), GameEvent::FlyerDestroyed { reward: 150 }],
        );
        assert_eq!(state.score, 180);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(30)));
        assert!(events.contains(&GameEvent::ScoreChanged(180)));
    }

    #[test]
    fn test_bonus_life_granted_once() {
        let mut state = playing();
        state.score = 1490;
        apply(&mut state, vec![kill(30)]);
        assert_eq!(state.score, 1520);
        assert_eq!(state.lives, STARTING_LIVES + 1);
        assert!(state.drain_events().contains(&GameEvent::BonusLife));

        // Crossing again later in the same game grants nothing
        state.score = 2990;
        apply(&mut state, vec![kill(30)]);
        assert_eq!(state.lives, STARTING_LIVES + 1);
        assert!(!state.drain_events().contains(&GameEvent::BonusLife));
    }

    #[test]
    fn test_bonus_life_on_exact_threshold() {
        let mut state = playing();
        state.score = 1480;
        add_score(&mut state, 20);
        assert_eq!(state.lives, STARTING_LIVES + 1);
    }

    #[test]
    fn test_player_hit_reports_lives() {
        let mut state = playing();
        state.lives = 2;
        apply(&mut state, vec![GameEvent::PlayerHit]);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerHit, GameEvent::LivesChanged(2)]
        );
    }

    #[test]
    fn test_game_over_sets_phase() {
        let mut state = playing();
        apply(
            &mut state,
            vec![GameEvent::GameOver {
                cause: GameOverCause::Invasion,
            }],
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_clearance_advances_wave() {
        let mut state = playing();
        state.score = 700;
        state.lives = 2;
        state.store.adversaries.clear();
        state.store.add_projectile(ProjectileKind::Adversary, 100.0, 300.0);
        state.store.flyer = Some(Flyer::enter(1.0, 50));
        state.formation.speed = 2.5;
        state.formation.direction = -1.0;
        state.formation.beat = 3;
        state.flyer_schedule.countdown = 640;

        apply(&mut state, vec![kill(30), GameEvent::FormationCleared]);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.wave, 2);
        assert_eq!((state.score, state.lives), (730, 2));
        assert_eq!(state.store.adversaries.len(), 55);
        assert_eq!(state.store.adversaries[0].bounds.top(), FORMATION_TOP + 20.0);
        assert!(state.store.projectiles.is_empty());
        assert!(state.store.flyer.is_none());
        assert_eq!(state.formation.direction, 1.0);
        assert_eq!(state.formation.beat, 0);
        assert!((state.formation.speed - wave_base_speed(2)).abs() < 0.0001);
        assert_eq!(state.flyer_schedule.countdown, 0);
        assert!((FLYER_MIN_INTERVAL..FLYER_MAX_INTERVAL).contains(&state.flyer_schedule.target));
        assert!(state.cues.contains(&AudioCue::FlyerSirenStop));
        assert!(state.drain_events().contains(&GameEvent::WaveChanged(2)));
    }

    #[test]
    fn test_cover_persists_across_waves() {
        let mut state = playing();
        state.store.covers[0].blocks[0].active = false;
        advance_wave(&mut state);
        assert!(!state.store.covers[0].blocks[0].active);
    }

    #[test]
    fn test_offset_and_speed_follow_wave_formula() {
        let mut state = playing();
        for wave in 2..=8u32 {
            advance_wave(&mut state);
            assert_eq!(state.wave, wave);
            let expected_top = FORMATION_TOP + ((wave - 1) as f32 * 20.0).min(100.0);
            assert_eq!(state.store.adversaries[0].bounds.top(), expected_top);
            let expected_speed = 1.0 + (wave - 1) as f32 * 0.2;
            assert!((state.formation.base_speed - expected_speed).abs() < 0.0001);
        }
    }

    #[test]
    fn test_game_over_beats_clearance_in_same_tick() {
        let mut state = playing();
        apply(
            &mut state,
            vec![
                kill(10),
                GameEvent::FormationCleared,
                GameEvent::PlayerHit,
                GameEvent::GameOver {
                    cause: GameOverCause::OutOfLives,
                },
            ],
        );
        assert_eq!(state.wave, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }
}
