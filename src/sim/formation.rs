//! Formation movement
//!
//! The adversary grid moves as one rigid body: a horizontal step every
//! `floor(30 / speed)` ticks, or a drop plus reversal when any member is near
//! the boundary it is heading toward.

use serde::{Deserialize, Serialize};

use super::entity::Adversary;
use crate::audio::AudioCue;
use crate::consts::*;

/// What a formation step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved sideways by `direction * 8`
    Shift,
    /// Moved down, reversed and sped up
    Drop,
}

/// Base speed multiplier for a 1-based wave number
pub fn wave_base_speed(wave: u32) -> f32 {
    SPEED_INITIAL + wave.saturating_sub(1) as f32 * SPEED_PER_WAVE
}

/// Extra start depth for a 1-based wave number
pub fn wave_row_offset(wave: u32) -> f32 {
    (wave.saturating_sub(1) as f32 * WAVE_ROW_OFFSET).min(MAX_WAVE_ROW_OFFSET)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationState {
    /// +1.0 sweeping right, -1.0 sweeping left
    pub direction: f32,
    /// Current speed multiplier, capped at `SPEED_MAX`
    pub speed: f32,
    /// Base speed of the current wave (uncapped formula value)
    pub base_speed: f32,
    /// Ticks since the last step
    pub step_counter: u32,
    /// Next march beat in the 4-cue rotation
    pub beat: u8,
}

impl Default for FormationState {
    fn default() -> Self {
        Self::for_wave(1)
    }
}

impl FormationState {
    pub fn for_wave(wave: u32) -> Self {
        let base_speed = wave_base_speed(wave);
        Self {
            direction: 1.0,
            speed: base_speed.min(SPEED_MAX),
            base_speed,
            step_counter: 0,
            beat: 0,
        }
    }

    /// Ticks between steps at the current speed
    pub fn step_interval(&self) -> u32 {
        ((FORMATION_BASE_INTERVAL as f32 / self.speed).floor() as u32).max(1)
    }

    pub fn speed_up(&mut self, amount: f32) {
        self.speed = (self.speed + amount).min(SPEED_MAX);
    }

    /// Per-kill acceleration
    pub fn on_kill(&mut self) {
        self.speed_up(SPEED_KILL_INCREMENT);
    }

    /// Advance the step timer by one tick, stepping the formation when due
    pub fn advance(
        &mut self,
        adversaries: &mut [Adversary],
        cues: &mut Vec<AudioCue>,
    ) -> Option<StepOutcome> {
        self.step_counter += 1;
        if self.step_counter < self.step_interval() {
            return None;
        }
        self.step_counter = 0;
        Some(self.step(adversaries, cues))
    }

    /// Take one formation step immediately
    pub fn step(&mut self, adversaries: &mut [Adversary], cues: &mut Vec<AudioCue>) -> StepOutcome {
        let at_edge = adversaries.iter().filter(|a| a.active).any(|a| {
            if self.direction > 0.0 {
                a.bounds.right() + FORMATION_EDGE_MARGIN >= PLAYFIELD_WIDTH
            } else {
                a.bounds.left() <= FORMATION_EDGE_MARGIN
            }
        });

        let outcome = if at_edge {
            for a in adversaries.iter_mut().filter(|a| a.active) {
                a.bounds.pos.y += FORMATION_DROP_Y;
            }
            self.direction = -self.direction;
            self.speed_up(SPEED_DROP_INCREMENT);
            log::debug!("Formation dropped, speed now {:.2}", self.speed);
            StepOutcome::Drop
        } else {
            let dx = self.direction * FORMATION_STEP_X;
            for a in adversaries.iter_mut().filter(|a| a.active) {
                a.bounds.pos.x += dx;
            }
            StepOutcome::Shift
        };

        for a in adversaries.iter_mut().filter(|a| a.active) {
            a.frame ^= 1;
        }
        cues.push(AudioCue::MarchBeat(self.beat));
        self.beat = (self.beat + 1) % MARCH_BEATS;

        outcome
    }
}
