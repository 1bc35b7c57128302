//! Bonus flyer scheduling and traversal

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Flyer;
use crate::audio::AudioCue;
use crate::consts::*;

/// Countdown toward the next flyer appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyerSchedule {
    /// Ticks elapsed without a flyer on screen
    pub countdown: u32,
    /// Tick count at which the next flyer appears
    pub target: u32,
}

impl FlyerSchedule {
    /// Fresh schedule with a newly drawn target
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut schedule = Self {
            countdown: 0,
            target: FLYER_MIN_INTERVAL,
        };
        schedule.redraw(rng);
        schedule
    }

    /// Reset the countdown and draw a new target from `[1200, 1800)`
    pub fn redraw(&mut self, rng: &mut impl Rng) {
        self.countdown = 0;
        self.target = rng.random_range(FLYER_MIN_INTERVAL..FLYER_MAX_INTERVAL);
    }

    /// Advance the flyer for one tick: spawn when due, move while present,
    /// retire on exit.
    pub fn update(
        &mut self,
        flyer: &mut Option<Flyer>,
        rng: &mut impl Rng,
        cues: &mut Vec<AudioCue>,
    ) {
        match flyer.as_mut() {
            Some(f) if f.active => {
                f.bounds.pos.x += f.direction * FLYER_SPEED;
                if f.has_exited() {
                    *flyer = None;
                    cues.push(AudioCue::FlyerSirenStop);
                    self.redraw(rng);
                }
            }
            Some(_) => {
                // Destroyed earlier; the resolver already redrew the schedule
                *flyer = None;
            }
            None => {
                self.countdown += 1;
                if self.countdown >= self.target {
                    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                    let reward = FLYER_REWARDS[rng.random_range(0..FLYER_REWARDS.len())];
                    log::debug!("Flyer spawned (dir {direction}, reward {reward})");
                    *flyer = Some(Flyer::enter(direction, reward));
                    self.countdown = 0;
                    cues.push(AudioCue::FlyerSirenStart);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_target_drawn_in_window() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let s = FlyerSchedule::new(&mut rng);
            assert!((FLYER_MIN_INTERVAL..FLYER_MAX_INTERVAL).contains(&s.target));
            assert_eq!(s.countdown, 0);
        }
    }

    #[test]
    fn test_spawns_when_countdown_reaches_target() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut schedule = FlyerSchedule::new(&mut rng);
        let mut flyer = None;
        let mut cues = Vec::new();
        for _ in 0..schedule.target - 1 {
            schedule.update(&mut flyer, &mut rng, &mut cues);
        }
        assert!(flyer.is_none());
        schedule.update(&mut flyer, &mut rng, &mut cues);
        let f = flyer.as_ref().expect("flyer should have spawned");
        assert!(FLYER_REWARDS.contains(&f.reward));
        assert!(f.bounds.right() <= 0.0 || f.bounds.left() >= PLAYFIELD_WIDTH);
        assert_eq!(cues, vec![AudioCue::FlyerSirenStart]);
    }

    #[test]
    fn test_traverses_and_exits() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut schedule = FlyerSchedule::new(&mut rng);
        let mut flyer = Some(Flyer::enter(-1.0, 150));
        let mut cues = Vec::new();

        schedule.update(&mut flyer, &mut rng, &mut cues);
        assert_eq!(
            flyer.as_ref().map(|f| f.bounds.left()),
            Some(PLAYFIELD_WIDTH - FLYER_SPEED)
        );

        let mut ticks = 1;
        while flyer.is_some() {
            schedule.update(&mut flyer, &mut rng, &mut cues);
            ticks += 1;
            assert!(ticks < 1000);
        }
        // Crossed the whole playfield plus its own width
        assert!(ticks as f32 * FLYER_SPEED > PLAYFIELD_WIDTH + FLYER_WIDTH);
        assert_eq!(cues, vec![AudioCue::FlyerSirenStop]);
        assert_eq!(schedule.countdown, 0);
    }
}
