//! Formation Assault entry point
//!
//! Headless demo: the autopilot plays fixed-rate ticks while cues go to a
//! logging audio sink and the playfield is drawn to stdout now and then.
//!
//! Usage: `formation-assault [settings.json]`

use std::path::PathBuf;

use formation_assault::audio::{AudioManager, LogSink};
use formation_assault::renderer::{FrameSnapshot, Renderer, TextRenderer, VisualKind};
use formation_assault::settings::Settings;
use formation_assault::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Formation Assault (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let seed = settings.effective_seed();

    let mut audio = AudioManager::new(Some(Box::new(LogSink)));
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut renderer = TextRenderer::new(std::io::stdout());
    let mut state = GameState::new(seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut input = TickInput {
        start: true,
        idle_mode: true,
        ..Default::default()
    };
    let mut games = 1u32;

    for n in 0..settings.demo_ticks {
        tick(&mut state, &input);
        input.start = false;
        input.restart = false;

        for event in state.drain_events() {
            match event {
                GameEvent::GameOver { cause } => {
                    log::info!("Game {games} over ({cause:?}), final score {}", state.score);
                }
                GameEvent::BonusLife => log::info!("Extra life!"),
                other => log::debug!("{other:?}"),
            }
        }
        audio.play_all(state.drain_cues());

        if settings.frame_every > 0 && n % settings.frame_every == 0 {
            let frame = FrameSnapshot::capture(&state);
            log::debug!(
                "Frame {}: {} cover blocks standing",
                frame.tick,
                frame.count(VisualKind::CoverBlock)
            );
            renderer.render(&frame);
        }

        if state.phase == GamePhase::GameOver {
            renderer.render(&FrameSnapshot::capture(&state));
            games += 1;
            input.restart = true;
        }
    }

    log::info!(
        "Demo finished after {} ticks: wave {}, score {}, {} game(s)",
        settings.demo_ticks,
        state.wave,
        state.score,
        games
    );
}
