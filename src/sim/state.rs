//! Game state and core simulation types
//!
//! All state that must survive a snapshot/resume lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Tier;
use super::flyer::FlyerSchedule;
use super::formation::{FormationState, wave_row_offset};
use super::store::EntityStore;
use crate::audio::AudioCue;
use crate::consts::*;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start signal, nothing simulates
    Start,
    /// Full tick pipeline active
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    OutOfLives,
    /// The formation reached the bottom of the playfield
    Invasion,
}

/// Notifications drained by the host once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    WaveChanged(u32),
    PhaseChanged(GamePhase),
    AdversaryDestroyed { tier: Tier, points: u32 },
    FlyerDestroyed { reward: u32 },
    PlayerHit,
    FormationCleared,
    BonusLife,
    GameOver { cause: GameOverCause },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only source of randomness in the simulation
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Current wave (1-based)
    pub wave: u32,
    /// Player lives
    pub lives: u8,
    /// Score
    pub score: u64,
    /// Whether this game's bonus life was already granted
    pub bonus_life_awarded: bool,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Every live entity
    pub store: EntityStore,
    pub formation: FormationState,
    pub flyer_schedule: FlyerSchedule,
    /// Pending host notifications
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Pending audio cues
    #[serde(skip)]
    pub cues: Vec<AudioCue>,
}

impl GameState {
    /// Create an idle game in the `Start` phase with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let flyer_schedule = FlyerSchedule::new(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            wave: 1,
            lives: STARTING_LIVES,
            score: 0,
            bonus_life_awarded: false,
            time_ticks: 0,
            store: EntityStore::default(),
            formation: FormationState::default(),
            flyer_schedule,
            events: Vec::new(),
            cues: Vec::new(),
        }
    }

    /// Start signal; only honored from the `Start` phase
    pub fn start(&mut self) {
        if self.phase == GamePhase::Start {
            self.reset_game();
        }
    }

    /// Restart signal: full reset straight into a new game
    pub fn restart(&mut self) {
        if self.phase != GamePhase::Start {
            self.set_phase(GamePhase::Start);
        }
        self.reset_game();
    }

    /// Pause toggle between `Playing` and `Paused`
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    /// Movement intent from the input collaborator
    pub fn set_movement(&mut self, left: bool, right: bool) {
        self.store.player.moving_left = left;
        self.store.player.moving_right = right;
    }

    /// Firing intent from the input collaborator
    pub fn set_firing(&mut self, firing: bool) {
        self.store.player.firing = firing;
    }

    /// Take all notifications emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take all audio cues emitted since the last drain
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Fresh player, formation, cover and counters; keeps the RNG stream and
    /// the held input intents
    fn reset_game(&mut self) {
        let held = self.store.player.clone();
        self.store.clear();
        self.store.player.moving_left = held.moving_left;
        self.store.player.moving_right = held.moving_right;
        self.store.player.firing = held.firing;
        self.store.spawn_covers();
        self.store.spawn_formation(FORMATION_TOP + wave_row_offset(1));

        self.wave = 1;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.bonus_life_awarded = false;
        self.time_ticks = 0;
        self.formation = FormationState::for_wave(1);
        self.flyer_schedule.redraw(&mut self.rng);

        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::LivesChanged(self.lives));
        self.events.push(GameEvent::WaveChanged(self.wave));
        self.set_phase(GamePhase::Playing);
        log::info!("New game (seed {})", self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.store.adversaries.is_empty());
        assert!(state.store.covers.is_empty());
    }

    #[test]
    fn test_start_populates_world() {
        let mut state = GameState::new(1);
        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.store.adversaries.len(), 55);
        assert_eq!(state.store.covers.len(), COVER_COUNT);
        assert_eq!(state.wave, 1);
        assert_eq!(state.lives, STARTING_LIVES);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
        assert!(events.contains(&GameEvent::WaveChanged(1)));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_start_ignored_outside_start_phase() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 500;
        state.start();
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 900;
        state.lives = 0;
        state.wave = 4;
        state.phase = GamePhase::GameOver;
        state.drain_events();

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.score, state.lives, state.wave), (0, STARTING_LIVES, 1));
        assert!(!state.bonus_life_awarded);
        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::PhaseChanged(GamePhase::Start)));
        assert_eq!(events.last(), Some(&GameEvent::PhaseChanged(GamePhase::Playing)));
    }

    #[test]
    fn test_new_game_redraws_flyer_countdown() {
        let mut state = GameState::new(1);
        state.flyer_schedule.countdown = 321;
        state.start();
        assert_eq!(state.flyer_schedule.countdown, 0);
        assert!((FLYER_MIN_INTERVAL..FLYER_MAX_INTERVAL).contains(&state.flyer_schedule.target));

        state.flyer_schedule.countdown = 999;
        state.restart();
        assert_eq!(state.flyer_schedule.countdown, 0);
        assert!((FLYER_MIN_INTERVAL..FLYER_MAX_INTERVAL).contains(&state.flyer_schedule.target));
    }

    #[test]
    fn test_held_intents_survive_restart() {
        let mut state = GameState::new(1);
        state.start();
        state.set_movement(false, true);
        state.set_firing(true);
        state.store.player.bounds.pos.x = 0.0;

        state.restart();
        let player = &state.store.player;
        assert!(player.moving_right && !player.moving_left);
        assert!(player.firing);
        // Position is still reset
        assert_eq!(player.bounds.left(), (PLAYFIELD_WIDTH - PLAYER_WIDTH) / 2.0);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(1);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Start);
        state.start();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
